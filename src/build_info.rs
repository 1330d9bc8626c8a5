/// JSON report identifying the build a demo ran with.
pub fn report(name: &str) -> String {
    let fields = [
        ("name", name),
        ("crate", env!("CARGO_PKG_NAME")),
        ("version", env!("CARGO_PKG_VERSION")),
        ("git_describe", env!("GIT_DESCRIBE")),
        ("git_hash", env!("GIT_HASH")),
    ];
    let body: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("  \"{key}\": \"{value}\""))
        .collect();
    format!("{{\n{}\n}}", body.join(",\n"))
}

pub fn print_report(name: &str) {
    println!("{}", report(name));
}
