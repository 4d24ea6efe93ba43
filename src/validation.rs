use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Flatten validation errors into a field -> message map, keeping the first message
/// reported for each field.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let first = errs.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            Some((field.to_string(), message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(length(min = 3, message = "too short"), email(message = "not an email"))]
        email: String,
        #[validate(range(min = 18))]
        age: u32,
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn keeps_one_message_per_field() {
        let form = Signup {
            email: "x".into(),
            age: 3,
            name: "ok".into(),
        };
        let errors = form.validate().unwrap_err();
        let messages = field_messages(&errors);

        assert_eq!(messages.len(), 2);
        assert!(["too short", "not an email"].contains(&messages["email"].as_str()));
        assert_eq!(messages["age"], "age is invalid");
        assert!(!messages.contains_key("name"));
    }
}
