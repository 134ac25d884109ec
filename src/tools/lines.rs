//! Splits input data into lines the same way for counting and for packing.
//!
//! A line ends at `\n`, `\r\n` or a lone `\r`. The terminator is not part of the
//! line. A final line without a terminator is still a line, but a terminator at
//! the very end does not start another (empty) line.

/// Iterator over the lines of a byte slice. Yields the offset of the line in
/// the input together with the line itself.
pub struct Lines<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> Lines<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = (usize, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.data.len() {
            return None;
        }
        let start = self.cursor;
        let rest = &self.data[start..];
        match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                // Skip the terminator, treating \r\n as a single one
                let mut skip = 1;
                if rest[end] == b'\r' && rest.get(end + 1) == Some(&b'\n') {
                    skip = 2;
                }
                self.cursor = start + end + skip;
                Some((start, &rest[..end]))
            }
            None => {
                self.cursor = self.data.len();
                Some((start, rest))
            }
        }
    }
}
