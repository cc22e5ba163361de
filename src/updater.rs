/// New state for a setter: either the value itself or a function of the current value.
pub enum Updater<T> {
    Value(T),
    Function(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Updater<T> {
    pub fn function(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Updater::Function(Box::new(f))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Updater::Function(_))
    }
}

impl<T> From<T> for Updater<T> {
    fn from(value: T) -> Self {
        Updater::Value(value)
    }
}

impl<T> std::fmt::Debug for Updater<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Updater::Value(_) => f.write_str("Updater::Value(..)"),
            Updater::Function(_) => f.write_str("Updater::Function(..)"),
        }
    }
}

pub fn updated_value_from_updater<T>(current: &T, updater: Updater<T>) -> T {
    match updater {
        Updater::Value(value) => value,
        Updater::Function(f) => f(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_updater_derives_from_current_value() {
        let current = "Some Value".to_string();
        let updater = Updater::function(|v: &String| v.to_uppercase());
        assert!(updater.is_function());

        assert_eq!(updated_value_from_updater(&current, updater), "SOME VALUE");
    }

    #[test]
    fn value_updater_replaces_current_value() {
        let current = "Some Value".to_string();
        let updater: Updater<String> = "New Value".to_string().into();
        assert!(!updater.is_function());

        assert_eq!(updated_value_from_updater(&current, updater), "New Value");
    }
}
