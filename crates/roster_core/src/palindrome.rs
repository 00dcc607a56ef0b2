/// Outcome of the "Check" action on the form screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PalindromeVerdict {
    Palindrome,
    NotPalindrome,
    EmptyInput,
}

impl PalindromeVerdict {
    pub fn message(self) -> &'static str {
        match self {
            PalindromeVerdict::Palindrome => "isPalindrome",
            PalindromeVerdict::NotPalindrome => "not palindrome",
            PalindromeVerdict::EmptyInput => "Please enter text to check for palindrome",
        }
    }
}

/// Ignores whitespace and letter case. Only a truly empty input is reported as
/// empty; whitespace alone reads as an empty string, which is a palindrome.
pub fn check_palindrome(text: &str) -> PalindromeVerdict {
    if text.is_empty() {
        return PalindromeVerdict::EmptyInput;
    }
    let cleaned: Vec<char> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if cleaned.iter().eq(cleaned.iter().rev()) {
        PalindromeVerdict::Palindrome
    } else {
        PalindromeVerdict::NotPalindrome
    }
}
