use std::path::PathBuf;

fn bin_path() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_platemap")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "platemap.exe"
            } else {
                "platemap"
            });
            p
        })
}

#[test]
fn cli_renders_png_from_csv() {
    if platemap::fonts::find_system_font().is_none() {
        eprintln!("skipping: no system font available on this machine");
        return;
    }

    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let csv_path = dir.join("annotations.csv");
    let out_path = dir.join("plate.png");
    let _ = std::fs::remove_file(&out_path);

    std::fs::write(
        &csv_path,
        "well,label,fill,label_color\n\
         A1,ctrl,lightgray,\n\
         B7,drug A,#ff0000,white\n",
    )
    .unwrap();

    let status = std::process::Command::new(bin_path())
        .arg(&csv_path)
        .args([
            "--title",
            "Smoke plate",
            "--subtitle",
            "line one\\nline two",
            "--date",
            "2025.06.01",
            "--output",
        ])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());
}

#[test]
fn cli_rejects_out_of_range_well_without_writing() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let csv_path = dir.join("bad_well.csv");
    let out_path = dir.join("bad_well.png");
    let _ = std::fs::remove_file(&out_path);

    std::fs::write(&csv_path, "well,label\nI1,out of range\n").unwrap();

    let status = std::process::Command::new(bin_path())
        .arg(&csv_path)
        .args(["--output"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!out_path.exists());
}
