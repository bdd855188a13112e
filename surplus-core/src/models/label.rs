//! Diagram labels.
//!
//! Labels are written in TeX (`"Cost, $C$"`) so that a TeX-capable backend can
//! typeset them. [`roman`] prepares a label for such a backend; [`plain`]
//! reduces it to readable text for backends that cannot typeset.

/// The labels shared by every diagram
pub struct Labels;

impl Labels {
    /// The integral of supply
    pub const COST: &'static str = "Cost, $C$";
    /// The integral of demand
    pub const UTILITY: &'static str = "Utility, $U$";
    /// Utility minus cost
    pub const WELFARE: &'static str = "Welfare, $W$";
    /// The welfare-maximizing point
    pub const OPTIMUM: &'static str = "Optimum";
    /// The quantity axis
    pub const QUANTITY_AXIS: &'static str = "$Q$";
    /// The price axis of supply and demand diagrams
    pub const PRICE_AXIS: &'static str = "$P$";
    /// The money axis of cost and utility diagrams
    pub const MONEY_AXIS: &'static str = r"$\mathdollar$";
}

/// Typeset every line of `text` upright.
pub fn roman(text: &str) -> String {
    text.split('\n')
        .map(|line| format!(r"\rm {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip TeX markup from a label.
///
/// Math delimiters and `\rm` are dropped, `\mathdollar` becomes `$`, other
/// commands are reduced to their name and the braces of sub/superscripts are
/// unwrapped, so `"$Q^{*}$"` reads `Q^*`.
pub fn plain(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' | '{' | '}' => {}
            '\\' => {
                let mut command = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphabetic() {
                        command.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match command.as_str() {
                    "" => {
                        // escaped symbol, e.g. `\$` or `\%`
                        if let Some(next) = chars.next() {
                            out.push(next);
                        }
                    }
                    "rm" | "mathrm" | "text" => {
                        if chars.peek() == Some(&' ') {
                            chars.next();
                        }
                    }
                    "mathdollar" => out.push('$'),
                    "cdot" => out.push('·'),
                    "times" => out.push('×'),
                    "ast" => out.push('*'),
                    other => out.push_str(other),
                }
            }
            _ => out.push(c),
        }
    }

    out
}
