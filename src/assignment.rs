/// One entry in a substitution overlay: an alias link to a smaller index, or
/// a bound value.
#[derive(Debug, Clone, PartialEq)]
pub enum SubstData<T> {
  Link(usize),
  Val(T),
}

/// Append-only, most-recent-wins overlay map from indices to substitution
/// entries. New bindings shadow older ones for the same index on lookup;
/// nothing is ever deleted. An index is only ever aliased to a smaller
/// index, which rules out alias cycles by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<T>(Vec<(usize, SubstData<T>)>);

impl<T> Default for Assignment<T> {
  fn default() -> Self {
    Self(Vec::new())
  }
}

impl<T: Clone> Assignment<T> {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Binds `index`, shadowing any previous entry for it.
  pub fn bind(&mut self, index: usize, data: SubstData<T>) {
    if let SubstData::Link(to) = data {
      assert!(to < index, "alias link {} -> {} points at a larger index", index, to);
    }
    self.0.push((index, data));
  }

  fn entry(&self, index: usize) -> Option<&SubstData<T>> {
    self.0.iter().rev().find(|(i, _)| *i == index).map(|(_, d)| d)
  }

  /// Chases alias links down to the canonical (smallest) index and returns
  /// it with the bound value, or `default` if the index is unbound.
  pub fn fetch(&self, index: usize, default: &T) -> (usize, T) {
    match self.entry(index) {
      Some(SubstData::Link(to)) => self.fetch(*to, default),
      Some(SubstData::Val(v)) => (index, v.clone()),
      None => (index, default.clone()),
    }
  }
}
