use num_traits::{Bounded, NumCast};

// Pixel casts. Out of range floats clamp to the target type's bounds
//------------------------------------------------------------------------------

pub fn round_px<T: NumCast + Bounded>(num: f64) -> T {
    clamp_cast(num.round())
}

pub fn floor_px<T: NumCast + Bounded>(num: f64) -> T {
    clamp_cast(num.floor())
}

pub fn ceil_px<T: NumCast + Bounded>(num: f64) -> T {
    clamp_cast(num.ceil())
}

fn clamp_cast<T: NumCast + Bounded>(num: f64) -> T {
    if num.is_nan() {
        return T::min_value();
    }
    <T as NumCast>::from(num).unwrap_or(if num < 0.0 { T::min_value() } else { T::max_value() })
}
