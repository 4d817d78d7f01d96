use std::fmt::Write;

use serde::Deserialize;

// Wi-Fi
//------------------------------------------------------------------------------

pub fn format_wifi(ssid: &str, password: &str, encryption: &str, hidden: bool) -> String {
    format!(
        "WIFI:S:{};T:{encryption};P:{};H:{hidden};;",
        escape_wifi(ssid),
        escape_wifi(password)
    )
}

fn escape_wifi(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '\\' | ';' | ',' | ':' | '"') {
            res.push('\\');
        }
        res.push(ch);
    }
    res
}

// vCard
//------------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VCard {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub org: String,
    pub title: String,
    pub url: String,
}

pub fn format_vcard(card: &VCard) -> String {
    let VCard { first_name, last_name, phone, email, org, title, url } = card;
    [
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("N:{last_name};{first_name};;;"),
        format!("FN:{first_name} {last_name}"),
        format!("ORG:{org}"),
        format!("TITLE:{title}"),
        format!("TEL:{phone}"),
        format!("EMAIL:{email}"),
        format!("URL:{url}"),
        "END:VCARD".to_string(),
    ]
    .join("\n")
}

// Email, sms and url
//------------------------------------------------------------------------------

pub fn format_email(address: &str, subject: &str, body: &str) -> String {
    format!("mailto:{address}?subject={}&body={}", percent_encode(subject), percent_encode(body))
}

pub fn format_sms(phone: &str, message: &str) -> String {
    format!("smsto:{phone}:{message}")
}

pub fn format_url(url: &str) -> String {
    if url.is_empty() || url.starts_with("http") {
        return url.to_string();
    }
    format!("https://{url}")
}

// Unreserved set matches the one browsers leave untouched in uri components
fn percent_encode(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => res.push(b as char),
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => res.push(b as char),
            _ => {
                let _ = write!(res, "%{b:02X}");
            }
        }
    }
    res
}


// Payload
//------------------------------------------------------------------------------

/// Content a QR code can carry, mapped to the text handed to the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Payload {
    Text {
        text: String,
    },
    Url {
        url: String,
    },
    Wifi {
        ssid: String,
        #[serde(default)]
        password: String,
        #[serde(default = "default_encryption")]
        encryption: String,
        #[serde(default)]
        hidden: bool,
    },
    #[serde(rename = "vcard")]
    VCard(VCard),
    Email {
        email: String,
        #[serde(default)]
        subject: String,
        #[serde(default)]
        body: String,
    },
    Sms {
        phone: String,
        #[serde(default)]
        message: String,
    },
}

fn default_encryption() -> String {
    "WPA".to_string()
}

impl Payload {
    pub fn to_text(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            Self::Url { url } => format_url(url),
            Self::Wifi { ssid, password, encryption, hidden } => {
                format_wifi(ssid, password, encryption, *hidden)
            }
            Self::VCard(card) => format_vcard(card),
            Self::Email { email, subject, body } => format_email(email, subject, body),
            Self::Sms { phone, message } => format_sms(phone, message),
        }
    }
}
