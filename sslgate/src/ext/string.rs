/// Small string helpers, mostly for building query fragments.
pub trait StrExt {
    /// Drops the last `count` characters. Shorter strings yield `""`.
    fn remove_last(&self, count: usize) -> &str;

    /// Drops the first `count` characters. Shorter strings yield `""`.
    fn remove_first(&self, count: usize) -> &str;

    /// Parses a decimal value, or 0 when the string is not a number.
    fn to_decimal(&self) -> f64;

    /// Wraps the string in `%` wildcards for LIKE matching.
    fn to_like(&self) -> String;

    /// Doubles every single-quote character.
    fn sanitize(&self) -> String;
}

impl StrExt for str {
    fn remove_last(&self, count: usize) -> &str {
        let mut chars = self.chars();
        for _ in 0..count {
            chars.next_back();
        }

        chars.as_str()
    }

    fn remove_first(&self, count: usize) -> &str {
        let mut chars = self.chars();
        for _ in 0..count {
            chars.next();
        }

        chars.as_str()
    }

    fn to_decimal(&self) -> f64 {
        self.trim().parse().unwrap_or(0.0)
    }

    fn to_like(&self) -> String {
        format!("%{self}%")
    }

    fn sanitize(&self) -> String {
        self.replace('\'', "''")
    }
}
