use std::path::PathBuf;
use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {}

// Where a problem was found. `case` and `line` are 1-based, 0 means unknown
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Location {
    pub file: PathBuf,
    pub case: usize,
    pub line: usize
}

impl Location {
    pub fn stdin() -> Self {
        Location {
            file: PathBuf::from("<stdin>"),
            case: 0,
            line: 0
        }
    }

    pub fn for_case(&self, case: usize) -> Self {
        Location {
            file: self.file.clone(),
            case,
            line: 0
        }
    }

    pub fn at_line(&self, line: usize) -> Self {
        Location {
            file: self.file.clone(),
            case: self.case,
            line
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file.display())?;
        if self.line != 0 {
            write!(f, ":{}", self.line)?;
        }
        if self.case != 0 {
            write!(f, " case {}", self.case)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType + std::fmt::Debug> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_location() {
        let base = Location {
            file: PathBuf::from("cases.txt"),
            case: 0,
            line: 0
        };

        assert_eq!(base.to_string(), "cases.txt");
        assert_eq!(base.at_line(4).to_string(), "cases.txt:4");
        assert_eq!(base.for_case(2).to_string(), "cases.txt case 2");
        assert_eq!(base.for_case(2).at_line(7).to_string(), "cases.txt:7 case 2");
        assert_eq!(Location::stdin().for_case(1).to_string(), "<stdin> case 1");
    }
}
