#[must_use]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[must_use]
pub fn plural_is_are(n: usize) -> &'static str {
    if n == 1 { "is" } else { "are" }
}

#[must_use]
pub fn render_symbol_counts(num_constants: usize, num_variables: usize) -> Option<String> {
    match (num_constants, num_variables) {
        (0, 0) => None,
        (constants, 0) => Some(format!("{constants} Constant{}", plural_s(constants))),
        (0, variables) => Some(format!("{variables} Variable{}", plural_s(variables))),
        (constants, variables) => Some(format!(
            "{constants} Constant{}, {variables} Variable{}",
            plural_s(constants),
            plural_s(variables)
        )),
    }
}
