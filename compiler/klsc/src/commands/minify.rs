//! The `minify` command: print a script without comments or spare whitespace.

use super::read_source;

pub fn minify_file(path: &str) {
    let source = read_source(path);
    println!("{}", kls_eval::minify(&source));
}
