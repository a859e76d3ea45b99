use std::fmt::{self, Write as _};

/// Instruction words as they appear in a `.test` file.
struct Words<'a>(&'a [u8]);

impl fmt::Display for Words<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (i, word) in self.0.chunks(2).enumerate() {
            if i != 0 {
                fmt.write_char(' ')?;
            }
            for byte in word {
                write!(fmt, "{byte:02x}")?;
            }
        }
        Ok(())
    }
}

/// Makes trailing whitespace visible.
struct Visible<'a>(&'a str);

impl fmt::Display for Visible<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let body = self.0.trim_end();
        fmt.write_str(body)?;
        for c in self.0[body.len()..].chars() {
            match c {
                '\t' => fmt.write_char('→')?,
                _ => fmt.write_char('•')?,
            }
        }
        Ok(())
    }
}

/// Line diff of an expected and an actual text.
pub struct Diff<'a> {
    file: &'a str,
    line: usize,
    bytes: &'a [u8],
    expect: &'a str,
    result: &'a str,
}

impl<'a> Diff<'a> {
    pub fn new(
        file: &'a str,
        line: usize,
        bytes: &'a [u8],
        expect: &'a str,
        result: &'a str,
    ) -> Self {
        Self {
            file,
            line,
            bytes,
            expect,
            result,
        }
    }
}

impl fmt::Display for Diff<'_> {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        use diff::Result as D;

        const W: usize = 5;
        if !self.file.is_empty() {
            writeln!(out, "{:W$}--> {}:{}", ' ', self.file, self.line)?;
        }
        if !self.bytes.is_empty() {
            for (i, chunk) in self.bytes.chunks(10).enumerate() {
                let prefix = if i == 0 { "words | " } else { "| " };
                writeln!(out, "{prefix:>10}{}", Words(chunk))?;
            }
        }
        let mut left = self.line.max(1);
        let mut right = left;
        for diff in diff::lines(self.expect, self.result) {
            match diff {
                D::Left(l) => {
                    writeln!(out, "{left:W$} - {}", Visible(l))?;
                    left += 1;
                }
                D::Both(l, _) => {
                    writeln!(out, "{left:W$} | {}", Visible(l))?;
                    left += 1;
                    right = left;
                }
                D::Right(r) => {
                    writeln!(out, "{right:W$} + {}", Visible(r))?;
                    right += 1;
                }
            }
        }
        Ok(())
    }
}

/// Compares two multi-line texts and prints a diff on mismatch.
pub fn check(file: &str, line: usize, expect: &str, result: &str) -> Result<(), String> {
    if expect != result {
        eprintln!("error: output mismatch");
        eprintln!("{}", Diff::new(file, line, &[], expect, result));
        return Err(format!("output mismatch, {file}:{line}"));
    }
    Ok(())
}
