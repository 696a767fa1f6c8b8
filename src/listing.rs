//! Plain-text listing of every function found, grouped by file, with its
//! doc comment. Useful for reviewing which functions a dispatcher exposes.

use crate::core::FileScan;

const RULE: &str = "--------------------------------------------------";

pub fn render_listing<'a, I>(scans: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a FileScan)>,
{
    let mut out = String::new();
    for (path, scan) in scans {
        out.push_str(&format!("{RULE}\nFILE: '{path}'\n{RULE}\n\n\n"));
        for signature in &scan.signatures {
            if let Some(doc) = &signature.doc_comment {
                out.push_str(doc);
            }
            out.push('\n');
            out.push_str(&signature.name);
            out.push_str("\n\n\n");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_signatures;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn test_listing_includes_doc_comments() {
        let scan = extract_signatures(
            Path::new("lights.axi"),
            indoc! {"
                /* Raise all loads. */
                define_function lights_up() {}
                define_function lights_down() {}
            "},
        );
        let listing = render_listing([("include/lights.axi", &scan)]);
        assert_eq!(
            listing,
            concat!(
                "--------------------------------------------------\n",
                "FILE: 'include/lights.axi'\n",
                "--------------------------------------------------\n",
                "\n\n",
                "/* Raise all loads. */\n",
                "lights_up\n\n\n",
                "\n",
                "lights_down\n\n\n",
            )
        );
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(render_listing(std::iter::empty()), "");
    }
}
