pub const NAME_REQ: &str = "Name must not be empty";
pub const NUMBER_REQ: &str = "Number must not be empty";

pub fn validate_name(name: &str) -> bool {
    // Anything goes as long as there is something besides whitespace
    !name.trim().is_empty()
}

pub fn validate_number(number: &str) -> bool {
    // Not checked against any phone number format
    !number.trim().is_empty()
}
