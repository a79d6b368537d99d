//! Column type normalization: shorthand and typos map to canonical names.

/// Canonical value the `morph` shorthand resolves to. Generators match on this
/// exact spelling, so it is kept as-is.
pub const MORPH_ALIAS_TARGET: &str = "morhps";

/// Shorthand → canonical type. Keys are already lowercased with spaces and
/// hyphens removed.
const TYPE_ALIASES: &[(&str, &str)] = &[
    ("str", "string"),
    ("s", "string"),
    ("relation", "relationship"),
    ("r", "relationship"),
    ("int", "integer"),
    ("i", "integer"),
    ("bigint", "biginteger"),
    ("bi", "biginteger"),
    ("array", "json"),
    ("collection", "json"),
    ("doc", "json"),
    ("j", "json"),
    ("increment", "increments"),
    ("inc", "increments"),
    ("bigincrement", "bigincrements"),
    ("biginc", "bigincrements"),
    ("ip", "ipAddress"),
    // canonical form is camel-cased, so its own lowercased spelling maps back
    ("ipaddress", "ipAddress"),
    ("bool", "boolean"),
    ("b", "boolean"),
    ("select", "enum"),
    ("multiselect", "set"),
    ("geo", "geometry"),
    ("morph", MORPH_ALIAS_TARGET),
    ("f", "float"),
    ("t", "text"),
    ("txt", "text"),
];

/// Canonical type name of a relationship attribute.
pub const RELATIONSHIP: &str = "relationship";

/// Normalize a user-typed column type.
///
/// The token is lowercased and stripped of spaces and hyphens before the alias
/// lookup. Unknown types come back in that folded form so any schema column
/// type passes through to the generators.
pub fn normalize_type(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .collect::<String>()
        .to_lowercase();

    TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve() {
        assert_eq!(normalize_type("str"), "string");
        assert_eq!(normalize_type("r"), "relationship");
        assert_eq!(normalize_type("bi"), "biginteger");
        assert_eq!(normalize_type("collection"), "json");
        assert_eq!(normalize_type("biginc"), "bigincrements");
        assert_eq!(normalize_type("ip"), "ipAddress");
        assert_eq!(normalize_type("multiselect"), "set");
        assert_eq!(normalize_type("txt"), "text");
    }

    #[test]
    fn folds_case_spaces_and_hyphens() {
        assert_eq!(normalize_type("Big-Int"), "biginteger");
        assert_eq!(normalize_type("multi select"), "set");
        assert_eq!(normalize_type("STRING"), "string");
    }

    #[test]
    fn unknown_types_pass_through() {
        assert_eq!(normalize_type("decimal"), "decimal");
        assert_eq!(normalize_type("mediumText"), "mediumtext");
    }

    #[test]
    fn morph_keeps_legacy_spelling() {
        assert_eq!(normalize_type("morph"), MORPH_ALIAS_TARGET);
        assert_eq!(normalize_type("morphs"), "morphs");
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "str", "s", "relation", "int", "bigint", "array", "doc", "inc",
            "bigincrement", "ip", "ipAddress", "bool", "select", "geo", "morph",
            "j", "f", "t", "Date-Time", "uuid", "", "Long Text",
        ];
        for input in inputs {
            let once = normalize_type(input);
            assert_eq!(normalize_type(&once), once, "input: {:?}", input);
        }
    }
}
