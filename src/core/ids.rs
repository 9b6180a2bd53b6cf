/// Per-entity identifier counter producing `P001`, `P002`, ... and widening
/// past 999 (`P1000`). Numbers are never handed out twice.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: char,
    last: u64,
}

impl IdSequence {
    pub fn new(prefix: char) -> Self {
        Self { prefix, last: 0 }
    }

    pub fn next_id(&mut self) -> String {
        self.last += 1;
        format_id(self.prefix, self.last)
    }

    /// The identifier the next call to `next_id` will return.
    pub fn peek(&self) -> String {
        format_id(self.prefix, self.last + 1)
    }

    pub fn issued(&self) -> u64 {
        self.last
    }
}

fn format_id(prefix: char, number: u64) -> String {
    format!("{}{:03}", prefix, number)
}
