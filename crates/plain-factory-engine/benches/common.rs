// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_license_body(sections: usize) -> String {
    let mut content = String::new();
    for section in 0..sections {
        content.push_str(&format!("## Section {section}\n\n"));
        content.push_str(&format!(
            "You may *use* and **share** this work[^s{section}] under [these terms][terms].\n\n"
        ));
        content.push_str("!!! note \"Plainly\"\n\n    Keep ==this notice== with every copy.\n\n");
        content.push_str("=== \"Short\"\n\n    Be kind.\n\n=== \"Long\"\n\n    ??? info\n\n        Details.\n\n");
        content.push_str(&format!("[^s{section}]: Footnote for section {section}.\n\n"));
    }
    content.push_str("[terms]: https://plainlicense.org/terms/\n");
    content
}
