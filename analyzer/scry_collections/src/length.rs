/// Measurable length, as a bag key.
///
/// String lengths are code-point counts, not byte counts, so a template
/// position maps one-to-one onto a character class.
pub trait Length {
    fn length(&self) -> u64;
}

impl Length for str {
    fn length(&self) -> u64 {
        self.chars().count() as u64
    }
}

impl Length for String {
    fn length(&self) -> u64 {
        self.as_str().length()
    }
}

impl Length for Box<str> {
    fn length(&self) -> u64 {
        self.as_ref().length()
    }
}

impl<T: Length + ?Sized> Length for &T {
    fn length(&self) -> u64 {
        (**self).length()
    }
}
