use std::borrow::Cow;

/// One row's resolved selection.
pub trait Entry {
	/// Zero-based display slot of the row that owns this entry.
	fn position(&self) -> usize;

	fn set_position(&mut self, position: usize);

	/// Text contributed to the rendered query.
	fn label(&self) -> Cow<'_, str>;

	/// Overwrites this entry's payload with `other`, keeping the current position.
	fn update_from(&mut self, other: Self)
	where
		Self: Sized,
	{
		let position = self.position();
		*self = other;
		self.set_position(position);
	}
}
