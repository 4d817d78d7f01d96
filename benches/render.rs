use std::time::{Duration, Instant};

use qrstyle::{encode, ECLevel, EyeShape, ModuleMatrix, ModuleShape, QRStyler, Style};

const RUNS: u32 = 20;

const MODULE_SHAPES: [ModuleShape; 4] =
    [ModuleShape::Square, ModuleShape::Circle, ModuleShape::Rounded, ModuleShape::Liquid];

const EYE_SHAPES: [EyeShape; 4] = [EyeShape::Square, EyeShape::Circle, EyeShape::Rounded, EyeShape::Leaf];

fn average(total: Duration) -> Duration {
    total / RUNS
}

fn bench_encode(data: &str) -> Duration {
    let start = Instant::now();
    for _ in 0..RUNS {
        let _ = encode(data, ECLevel::M);
    }
    average(start.elapsed())
}

fn bench_svg(m: &ModuleMatrix, style: &Style, size: u32) -> Duration {
    let start = Instant::now();
    for _ in 0..RUNS {
        let _ = qrstyle::render::svg::render(m, style, size);
    }
    average(start.elapsed())
}

async fn bench_raster(m: &ModuleMatrix, style: &Style, size: u32) -> Duration {
    let start = Instant::now();
    for _ in 0..RUNS {
        let _ = qrstyle::render::raster::render(m, style, size).await;
    }
    average(start.elapsed())
}

fn main() {
    println!("🚀 Running QRStyle Benchmark Suite");
    println!("==================================\n");

    let rt = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            return;
        }
    };

    let total_start = Instant::now();
    let data = "https://example.com/".repeat(20);

    println!("🔢 Encoding...");
    println!("--------------");
    println!("{} chars: {:?}\n", data.len(), bench_encode(&data));

    let m = match encode(&data, ECLevel::M) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Failed to encode: {e}");
            return;
        }
    };

    println!("🎨 Rendering {}x{} modules...", m.width(), m.width());
    println!("-----------------------------");
    for size in [400, 1200] {
        for shape in MODULE_SHAPES {
            for eye in EYE_SHAPES {
                let style = Style { module_shape: shape, eye_shape: eye, ..Style::default() };
                let svg = bench_svg(&m, &style, size);
                let raster = rt.block_on(bench_raster(&m, &style, size));
                println!("{size:>5}px {shape:?}/{eye:?}: svg {svg:?}, raster {raster:?}");
            }
        }
    }

    println!("\n📦 Full pipeline...");
    println!("-------------------");
    let start = Instant::now();
    for _ in 0..RUNS {
        let mut styler = QRStyler::new(&data);
        styler.module_shape(ModuleShape::Liquid).eye_shape(EyeShape::Leaf).label("SCAN ME");
        let _ = rt.block_on(styler.to_raster(800));
    }
    println!("Styled raster with label: {:?}\n", average(start.elapsed()));

    println!("✅ All benchmarks completed!");
    println!("Total time elapsed: {:?}", total_start.elapsed());
}
