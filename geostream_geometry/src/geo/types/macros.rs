/// Implements `From<Vec<T>>` and `From<&[T; N]>` for a newtype over `Vec<$item>`,
/// converting each element with `$item::from`.
#[macro_export]
macro_rules! impl_from_elements {
	($($t:ty,$item:ty),*) => {$(
		impl<T> From<Vec<T>> for $t
		where
			$item: From<T>,
		{
			fn from(value: Vec<T>) -> Self {
				Self(value.into_iter().map(<$item>::from).collect())
			}
		}

		impl<'a, T, const N: usize> From<&'a [T; N]> for $t
		where
			$item: From<&'a T>,
		{
			fn from(value: &'a [T; N]) -> Self {
				Self(value.iter().map(|v| <$item>::from(v)).collect())
			}
		}
	)*}
}
