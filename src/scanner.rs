static DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
static OPERATORS: &[char] = &['+', '-', '*', '/', '^', '(', ')'];

pub struct Scanner<I: Iterator>
where
    I::Item: Clone,
{
    src: I,
    buf: Vec<I::Item>,
    pos: isize,
}

// Scanners are Iterators
impl<I> Iterator for Scanner<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;
    fn next(&mut self) -> Option<Self::Item> {
        self.pos += 1;
        // Check if we need to fill the buffer
        let lacking = self.pos - (self.buf.len() as isize) + 1;
        if lacking > 0 {
            self.buf.extend(self.src.by_ref().take(lacking as usize));
        }
        // limit the buffer position to the buffer length at most
        self.pos = std::cmp::min(self.pos, self.buf.len() as isize);
        self.current()
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }

    // scan unsigned integers [0-9]+, no sign, fraction or exponent
    pub fn scan_digits(&mut self) -> Option<String> {
        if !self.skip_all(DIGITS) {
            return None;
        }
        Some(self.extract_string())
    }

    // scan a single operator or bracket
    pub fn scan_operator(&mut self) -> Option<char> {
        let op = self.accept_any(OPERATORS)?;
        self.extract();
        Some(op)
    }

    // anything that isn't a digit or an operator names a variable
    pub fn scan_variable(&mut self) -> Option<char> {
        let name = self.next()?;
        self.extract();
        Some(name)
    }
}

impl<I> Scanner<I>
where
    I: Iterator,
    I::Item: Clone,
{
    pub fn new(source: I) -> Scanner<I> {
        Scanner {
            src: source,
            buf: Vec::new(),
            pos: -1,
        }
    }

    // Allows getting current buffer position to backtrack
    pub fn buffer_pos(&self) -> isize {
        self.pos
    }

    // Reset buffer position, normally used for backtracking
    // If position is out of bounds set_buffer_pos returns false
    pub fn set_buffer_pos(&mut self, pos: isize) -> bool {
        if pos < -1 || pos > (self.buf.len() as isize) {
            return false;
        }
        self.pos = pos;
        true
    }

    // Returns the item on which the scanner is positioned
    pub fn current(&self) -> Option<I::Item> {
        let pos = self.pos as usize;
        if self.pos < 0 || pos >= self.buf.len() {
            return None;
        }
        Some(self.buf[pos].clone())
    }

    // Consumes the buffer up to the cursor, keeping the lookahead
    pub fn extract(&mut self) -> Vec<I::Item> {
        let split_point = std::cmp::min(self.pos + 1, self.buf.len() as isize).max(0);
        self.pos = -1;
        let mut remaining = self.buf.split_off(split_point as usize);
        std::mem::swap(&mut self.buf, &mut remaining);
        remaining
    }
}

impl<I> Scanner<I>
where
    I: Iterator,
    I::Item: Clone + PartialEq,
{
    // Advance the scanner only if the next item is in the 'any' set,
    // self.current() will return the matched item if accept matched any
    pub fn accept_any(&mut self, any: &[I::Item]) -> Option<I::Item> {
        let backtrack = self.buffer_pos();
        if let Some(next) = self.next() {
            if any.contains(&next) {
                return Some(next);
            }
        }
        self.set_buffer_pos(backtrack);
        None
    }

    // Skip over the 'over' set, result is if the scanner was advanced
    pub fn skip_all(&mut self, over: &[I::Item]) -> bool {
        let mut advanced = false;
        while self.accept_any(over).is_some() {
            advanced = true;
        }
        advanced
    }
}

#[cfg(test)]
mod tests {
    use super::Scanner;

    #[test]
    fn digits_stop_at_operator() {
        let mut s = Scanner::new("123+4".chars());
        assert_eq!(s.scan_digits(), Some(format!("123")));
        assert_eq!(s.scan_digits(), None);
        assert_eq!(s.scan_operator(), Some('+'));
        assert_eq!(s.scan_digits(), Some(format!("4")));
        assert_eq!(s.scan_operator(), None);
        assert_eq!(s.scan_variable(), None);
    }

    #[test]
    fn failed_accept_backtracks() {
        let mut s = Scanner::new("x1".chars());
        assert_eq!(s.scan_digits(), None);
        assert_eq!(s.scan_operator(), None);
        assert_eq!(s.scan_variable(), Some('x'));
        assert_eq!(s.scan_digits(), Some(format!("1")));
    }

    #[test]
    fn extract_keeps_lookahead() {
        let mut s = Scanner::new("ab".chars());
        assert_eq!(s.next(), Some('a'));
        assert_eq!(s.next(), Some('b'));
        assert!(s.set_buffer_pos(0));
        assert_eq!(s.extract_string(), format!("a"));
        assert_eq!(s.current(), None);
        assert_eq!(s.next(), Some('b'));
    }

    #[test]
    fn buffer_pos_bounds() {
        let mut s = Scanner::new("a".chars());
        assert!(!s.set_buffer_pos(-2));
        assert!(!s.set_buffer_pos(1));
        s.next();
        assert!(s.set_buffer_pos(1));
        assert_eq!(s.current(), None);
    }
}
