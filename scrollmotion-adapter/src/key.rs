/// Identity for a host element bound to the driver.
///
/// Any equality-comparable handle works: a numeric id, an interned node
/// reference, a string selector.
pub trait ElementKey: Eq {}
impl<T: Eq> ElementKey for T {}
