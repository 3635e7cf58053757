//! `grabtab strip-range <url>` – print a URL without its range parameter.

use grabtab_core::url_model::strip_trailing_range;

pub fn run_strip_range(url: &str) {
    println!("{}", strip_trailing_range(url));
}
