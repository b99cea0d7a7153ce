use super::error::DispatchError;
use crate::messages::ValidCommand;

/// Token `index` of a message
pub fn arg<S: AsRef<str>>(msg: &[S], index: usize) -> Result<&str, DispatchError> {
    msg.get(index)
        .map(AsRef::as_ref)
        .ok_or(DispatchError::MissingArgument { index })
}

/// Token `index` parsed as a signed integer
pub fn int_arg<S: AsRef<str>>(msg: &[S], index: usize) -> Result<i32, DispatchError> {
    let value = arg(msg, index)?;
    value.parse().map_err(|_| DispatchError::InvalidInteger {
        index,
        value: value.to_string(),
    })
}

/// Clamp to a colour channel
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Split a status line into message tokens.
///
/// Text and asset path commands keep everything after the tag as a single
/// token so text and file names with spaces survive a save/load cycle.
pub fn tokenize(line: &str) -> Vec<String> {
    let line = line.trim();
    let mut parts = line.splitn(2, char::is_whitespace);
    let Some(tag) = parts.next().filter(|tag| !tag.is_empty()) else {
        return Vec::new();
    };
    let rest = parts.next().unwrap_or("").trim_start();

    let mut tokens = vec![tag.to_string()];
    let rest_of_line = tag
        .parse::<ValidCommand>()
        .is_ok_and(|cmd| cmd.takes_rest_of_line());
    if rest_of_line {
        if !rest.is_empty() {
            tokens.push(rest.to_string());
        }
    } else {
        tokens.extend(rest.split_whitespace().map(str::to_string));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_arg() {
        let msg = ["CHANGE_TINT", "12", "-5", "abc", "+7"];
        assert_eq!(int_arg(&msg, 1).unwrap(), 12);
        assert_eq!(int_arg(&msg, 2).unwrap(), -5);
        assert_eq!(int_arg(&msg, 4).unwrap(), 7);
        assert!(matches!(
            int_arg(&msg, 3),
            Err(DispatchError::InvalidInteger { index: 3, .. })
        ));
        assert!(matches!(
            int_arg(&msg, 5),
            Err(DispatchError::MissingArgument { index: 5 })
        ));
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(300), 255);
        assert_eq!(clamp_channel(-5), 0);
        assert_eq!(clamp_channel(17), 17);
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("CHANGE_OUTPUT  1 0 "), vec!["CHANGE_OUTPUT", "1", "0"]);
        assert_eq!(tokenize("TEXTWR hello  world"), vec!["TEXTWR", "hello  world"]);
        assert_eq!(tokenize("IMAGE my pic.png"), vec!["IMAGE", "my pic.png"]);
        assert_eq!(
            tokenize("TEXTDEF_FILE  deform me.png "),
            vec!["TEXTDEF_FILE", "deform me.png"]
        );
        assert_eq!(tokenize("TEXTDEF 4 5"), vec!["TEXTDEF", "4", "5"]);
        assert_eq!(tokenize("STATUS"), vec!["STATUS"]);
        assert!(tokenize("   ").is_empty());
    }
}
