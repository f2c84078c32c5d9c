/// A selector value: either the "nothing chosen yet" placeholder or a real value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
	Placeholder,
	Value(T),
}

impl Choice<String> {
	/// Classifies a raw control value against the selector's placeholder text.
	pub fn from_control(value: &str, placeholder: &str) -> Self {
		if value == placeholder || value.is_empty() {
			Choice::Placeholder
		} else {
			Choice::Value(value.to_string())
		}
	}
}

impl<T> Choice<T> {
	pub fn is_placeholder(&self) -> bool {
		matches!(self, Choice::Placeholder)
	}

	pub fn value(&self) -> Option<&T> {
		match self {
			Choice::Placeholder => None,
			Choice::Value(value) => Some(value),
		}
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Choice<U> {
		match self {
			Choice::Placeholder => Choice::Placeholder,
			Choice::Value(value) => Choice::Value(f(value)),
		}
	}
}

impl<T> From<Option<T>> for Choice<T> {
	fn from(value: Option<T>) -> Self {
		value.map_or(Choice::Placeholder, Choice::Value)
	}
}
