// ============================================================
// Layer 4 — Prompt Preprocessor
// ============================================================
// Normalises one line of the continuation file before it is
// split into words and looked up in the vocabulary.
//
// Characters that would silently glue onto a word and turn it
// into <unk>:
//   - Byte order mark (U+FEFF) at the start of the file
//   - Zero-width space (U+200B)
//   - Carriage return left over from Windows line endings
//   - Any other control character
//
// Cleaning steps:
//   1. Map the characters above (and tabs, NBSP) to a space
//   2. Collapse runs of spaces into one
//   3. Trim both ends
//
// Case is left untouched: the vocabulary decides what a word is.

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean one prefix line. Never introduces or removes words
    /// other than the invisible characters listed above.
    pub fn clean_line(&self, line: &str) -> String {
        let mapped = line.chars().map(|c| match c {
            '\t' | '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
            c if c.is_control() => ' ',
            c => c,
        });

        let mut out        = String::with_capacity(line.len());
        let mut last_space = true;
        for c in mapped {
            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        out.trim_end().to_string()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
