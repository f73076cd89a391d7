// File: crates/crash-chart-core/tests/smoke.rs
// Purpose: End-to-end smoke test: CSV on disk to SVG and PNG files.

use crash_chart_core::{ChartKind, ControlEvent, Dashboard, RenderOptions};

const CSV: &str = "\
Date,Time,Location,Operator,Aboard,Fatalities,Ground
1985,18:56,\"Gunma, Japan\",Japan Air Lines,524,520,0
1985,,Dallas,Delta Air Lines,163,135,1
1986,,Moscow,Aeroflot,12,10,0
";

#[test]
fn render_smoke_files() {
    let dir = std::path::PathBuf::from("target/test_out");
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("smoke_incidents.csv");
    std::fs::write(&input, CSV).unwrap();

    let mut dashboard = Dashboard::initialize(&input, RenderOptions::default()).expect("load csv");
    assert_eq!(dashboard.store().len(), 3);
    assert_eq!(dashboard.chart().unwrap().series.len(), 2);

    let svg_out = dir.join("smoke.svg");
    dashboard.write_svg(&svg_out).expect("write svg");
    let text = std::fs::read_to_string(&svg_out).expect("svg exists");
    assert!(text.contains("Japan Air Lines"));

    dashboard.handle(ControlEvent::Chart(ChartKind::Pie)).unwrap();
    let png_out = dir.join("smoke.png");
    dashboard.write_png(&png_out).expect("write png");
    assert!(std::fs::metadata(&png_out).expect("png exists").len() > 0);

    // Also verify in-memory API works
    let bytes = dashboard.png_bytes().expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!((img.width(), img.height()), (1000, 600));
}

#[test]
fn missing_input_is_an_io_error() {
    let err = Dashboard::initialize("target/test_out/does_not_exist.csv", RenderOptions::default())
        .err()
        .expect("missing file fails");
    assert!(matches!(err, crash_chart_core::ChartError::Io { .. }));
}
