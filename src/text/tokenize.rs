/// A maximal run of either ASCII-alphabetic or non-alphabetic characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub alphabetic: bool,
}

/// Split lowercased text into alternating alphabetic / non-alphabetic runs.
///
/// Every input character lands in exactly one token, order is preserved, and
/// no token is empty; concatenating the token texts reproduces the input.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_alpha = false;

    for ch in text.chars() {
        let alpha = ch.is_ascii_alphabetic();
        if !current.is_empty() && alpha != current_alpha {
            tokens.push(Token {
                text: std::mem::take(&mut current),
                alphabetic: current_alpha,
            });
        }
        current.push(ch);
        current_alpha = alpha;
    }
    if !current.is_empty() {
        tokens.push(Token {
            text: current,
            alphabetic: current_alpha,
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_alternating_runs() {
        let tokens = tokenize("it's a trap!");
        let texts: Vec<(&str, bool)> = tokens
            .iter()
            .map(|t| (t.text.as_str(), t.alphabetic))
            .collect();
        assert_eq!(
            texts,
            vec![
                ("it", true),
                ("'", false),
                ("s", true),
                (" ", false),
                ("a", true),
                (" ", false),
                ("trap", true),
                ("!", false),
            ]
        );
    }

    #[test]
    fn concatenation_reproduces_input() {
        let input = "zdu, zdu... zdu?! 42\n";
        let joined: String = tokenize(input).into_iter().map(|t| t.text).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn no_token_is_empty() {
        for input in ["", "abc", "   ", "a b", "7a7"] {
            assert!(tokenize(input).iter().all(|t| !t.text.is_empty()));
        }
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
    }
}
