use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

const RESOURCE_DIR: &str = "resources";
const RESOURCE_XML: &str = "resources/resources.gresources.xml";

fn main() {
    println!("cargo:rerun-if-changed={RESOURCE_DIR}/");

    generate_resource_file();

    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let target_file = Path::new(&out_dir).join("resources.gresources");

    let status = Command::new("glib-compile-resources")
        .arg(format!("--sourcedir={RESOURCE_DIR}"))
        .arg("--target")
        .arg(&target_file)
        .arg(RESOURCE_XML)
        .status()
        .expect("Failed to execute glib-compile-resources");

    if !status.success() {
        panic!("glib-compile-resources failed");
    }
}

fn collect_files(dir: PathBuf, base: &Path, buf: &mut Vec<String>) {
    let Ok(entries) = dir.read_dir() else {
        return;
    };
    for item in entries.filter_map(Result::ok) {
        let path = item.path();
        if path.file_name().and_then(|n| n.to_str()) == Some("resources.gresources.xml") {
            continue;
        }
        if path.is_dir() {
            collect_files(path, base, buf)
        } else if let Ok(rel) = path.strip_prefix(base) {
            buf.push(rel.to_string_lossy().to_string());
        }
    }
}

fn generate_resource_file() {
    let base = PathBuf::from(RESOURCE_DIR);
    let mut files = Vec::new();
    collect_files(base.clone(), &base, &mut files);
    files.sort();

    let entries = files
        .iter()
        .map(|f| format!(r#"<file alias="{f}">{f}</file>"#))
        .collect::<Vec<String>>()
        .join("\n        ");

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gresources>
    <gresource prefix="/dev/swipecal">
        {entries}
    </gresource>
</gresources>"#
    );

    fs::write(RESOURCE_XML, xml).expect("Failed to write resources.gresources.xml");
}
