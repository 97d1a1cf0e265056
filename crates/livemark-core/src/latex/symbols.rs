//! Static LaTeX → Unicode tables.
//!
//! Command names are looked up without their leading backslash.

/// Unicode rendering of a LaTeX command, if one is known.
pub fn lookup(command: &str) -> Option<&'static str> {
    let unicode = match command {
        // Greek lowercase
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "epsilon" => "ε",
        "varepsilon" => "ε",
        "zeta" => "ζ",
        "eta" => "η",
        "theta" => "θ",
        "vartheta" => "ϑ",
        "iota" => "ι",
        "kappa" => "κ",
        "lambda" => "λ",
        "mu" => "μ",
        "nu" => "ν",
        "xi" => "ξ",
        "pi" => "π",
        "varpi" => "ϖ",
        "rho" => "ρ",
        "varrho" => "ϱ",
        "sigma" => "σ",
        "varsigma" => "ς",
        "tau" => "τ",
        "upsilon" => "υ",
        "phi" => "φ",
        "varphi" => "ϕ",
        "chi" => "χ",
        "psi" => "ψ",
        "omega" => "ω",

        // Greek uppercase
        "Gamma" => "Γ",
        "Delta" => "Δ",
        "Theta" => "Θ",
        "Lambda" => "Λ",
        "Xi" => "Ξ",
        "Pi" => "Π",
        "Sigma" => "Σ",
        "Upsilon" => "Υ",
        "Phi" => "Φ",
        "Psi" => "Ψ",
        "Omega" => "Ω",

        // Operators and relations
        "cdot" => "·",
        "times" => "×",
        "div" => "÷",
        "pm" => "±",
        "mp" => "∓",
        "leq" | "le" => "≤",
        "geq" | "ge" => "≥",
        "neq" | "ne" => "≠",
        "approx" => "≈",
        "equiv" => "≡",
        "sim" => "∼",
        "simeq" => "≃",
        "propto" => "∝",
        "ll" => "≪",
        "gg" => "≫",
        "mid" => "|",
        "lesssim" => "≲",
        "gtrsim" => "≳",
        "lessapprox" => "⪅",
        "gtrapprox" => "⪆",
        "prec" => "≺",
        "succ" => "≻",
        "preceq" => "⪯",
        "succeq" => "⪰",

        // Arrows
        "leftarrow" => "←",
        "rightarrow" | "to" => "→",
        "leftrightarrow" => "↔",
        "Leftarrow" => "⇐",
        "Rightarrow" => "⇒",
        "Leftrightarrow" => "⇔",
        "uparrow" => "↑",
        "downarrow" => "↓",
        "mapsto" => "↦",

        // Sets and logic
        "forall" => "∀",
        "exists" => "∃",
        "nexists" => "∄",
        "in" => "∈",
        "notin" => "∉",
        "ni" => "∋",
        "subset" => "⊂",
        "supset" => "⊃",
        "subseteq" => "⊆",
        "supseteq" => "⊇",
        "cup" => "∪",
        "cap" => "∩",
        "emptyset" | "varnothing" => "∅",
        "neg" => "¬",
        "land" => "∧",
        "lor" => "∨",
        "top" => "⊤",
        "bot" | "perp" => "⊥",

        // Calculus and analysis
        "infty" => "∞",
        "partial" => "∂",
        "nabla" => "∇",
        "int" => "∫",
        "iint" => "∬",
        "iiint" => "∭",
        "oint" => "∮",
        "sum" => "∑",
        "prod" => "∏",
        "coprod" => "∐",

        // Miscellaneous
        "sqrt" => "√",
        "circ" => "∘",
        "bullet" => "•",
        "star" => "★",
        "dagger" => "†",
        "ddagger" => "‡",
        "ell" => "ℓ",
        "hbar" => "ℏ",
        "prime" => "′",
        "angle" => "∠",
        "parallel" => "∥",
        "square" => "□",
        "ldots" => "…",
        "cdots" => "⋯",
        "vdots" => "⋮",
        "ddots" => "⋱",

        // Spacing
        "quad" | "," | ";" | ":" => " ",
        "qquad" => "  ",
        "!" => "",

        // Accents: combining marks appended to the accented argument
        "hat" => "\u{0302}",
        "tilde" => "\u{0303}",
        "bar" => "\u{0304}",
        "dot" => "\u{0307}",
        "ddot" => "\u{0308}",
        "vec" => "\u{20D7}",

        // Function names stay textual
        "max" => "max",
        "min" => "min",
        "log" => "log",
        "exp" => "exp",
        "sin" => "sin",
        "cos" => "cos",
        "tan" => "tan",
        "lim" => "lim",
        "sup" => "sup",
        "inf" => "inf",
        "arg" => "arg",

        _ => return None,
    };
    Some(unicode)
}

/// Accent commands whose braced argument receives a combining mark.
pub fn is_accent(command: &str) -> bool {
    matches!(command, "tilde" | "hat" | "bar" | "dot" | "ddot" | "vec")
}

/// Script (calligraphic) capital used by `\mathcal`.
pub fn mathcal(c: char) -> Option<char> {
    let styled = match c {
        'A' => '𝒜',
        'B' => 'ℬ',
        'C' => '𝒞',
        'D' => '𝒟',
        'E' => 'ℰ',
        'F' => 'ℱ',
        'G' => '𝒢',
        'H' => 'ℋ',
        'I' => 'ℐ',
        'J' => '𝒥',
        'K' => '𝒦',
        'L' => 'ℒ',
        'M' => 'ℳ',
        'N' => '𝒩',
        'O' => '𝒪',
        'P' => '𝒫',
        'Q' => '𝒬',
        'R' => 'ℛ',
        'S' => '𝒮',
        'T' => '𝒯',
        'U' => '𝒰',
        'V' => '𝒱',
        'W' => '𝒲',
        'X' => '𝒳',
        'Y' => '𝒴',
        'Z' => '𝒵',
        _ => return None,
    };
    Some(styled)
}

/// Double-struck capital used by `\mathbb`.
pub fn mathbb(c: char) -> Option<char> {
    let styled = match c {
        'A' => '𝔸',
        'B' => '𝔹',
        'C' => 'ℂ',
        'D' => '𝔻',
        'E' => '𝔼',
        'F' => '𝔽',
        'G' => '𝔾',
        'H' => 'ℍ',
        'I' => '𝕀',
        'J' => '𝕁',
        'K' => '𝕂',
        'L' => '𝕃',
        'M' => '𝕄',
        'N' => 'ℕ',
        'O' => '𝕆',
        'P' => 'ℙ',
        'Q' => 'ℚ',
        'R' => 'ℝ',
        'S' => '𝕊',
        'T' => '𝕋',
        'U' => '𝕌',
        'V' => '𝕍',
        'W' => '𝕎',
        'X' => '𝕏',
        'Y' => '𝕐',
        'Z' => 'ℤ',
        _ => return None,
    };
    Some(styled)
}

pub fn subscript(c: char) -> Option<char> {
    let script = match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'h' => 'ₕ',
        'i' => 'ᵢ',
        'j' => 'ⱼ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'o' => 'ₒ',
        'p' => 'ₚ',
        'r' => 'ᵣ',
        's' => 'ₛ',
        't' => 'ₜ',
        'u' => 'ᵤ',
        'v' => 'ᵥ',
        'x' => 'ₓ',
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        _ => return None,
    };
    Some(script)
}

pub fn superscript(c: char) -> Option<char> {
    let script = match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        'a' => 'ᵃ',
        'b' => 'ᵇ',
        'c' => 'ᶜ',
        'd' => 'ᵈ',
        'e' => 'ᵉ',
        'f' => 'ᶠ',
        'g' => 'ᵍ',
        'h' => 'ʰ',
        'i' => 'ⁱ',
        'j' => 'ʲ',
        'k' => 'ᵏ',
        'l' => 'ˡ',
        'm' => 'ᵐ',
        'n' => 'ⁿ',
        'o' => 'ᵒ',
        'p' => 'ᵖ',
        'r' => 'ʳ',
        's' => 'ˢ',
        't' => 'ᵗ',
        'u' => 'ᵘ',
        'v' => 'ᵛ',
        'w' => 'ʷ',
        'x' => 'ˣ',
        'y' => 'ʸ',
        'z' => 'ᶻ',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        _ => return None,
    };
    Some(script)
}

/// Map every char through `table`, passing unmapped chars through.
pub fn restyle(text: &str, table: fn(char) -> Option<char>) -> String {
    text.chars().map(|c| table(c).unwrap_or(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("alpha"), Some("α"));
        assert_eq!(lookup("Omega"), Some("Ω"));
        assert_eq!(lookup("le"), lookup("leq"));
        assert_eq!(lookup("!"), Some(""));
        assert_eq!(lookup("frac"), None);
        assert_eq!(lookup("notacommand"), None);
    }

    #[test]
    fn test_accents_have_marks() {
        for accent in ["tilde", "hat", "bar", "dot", "ddot", "vec"] {
            assert!(is_accent(accent));
            assert!(lookup(accent).is_some());
        }
        assert!(!is_accent("alpha"));
    }

    #[test]
    fn test_restyle_passes_unmapped_through() {
        assert_eq!(restyle("RZ", mathbb), "ℝℤ");
        assert_eq!(restyle("Ab", mathcal), "𝒜b");
        assert_eq!(restyle("i+1", subscript), "ᵢ₊₁");
        assert_eq!(restyle("q", superscript), "q");
    }
}
