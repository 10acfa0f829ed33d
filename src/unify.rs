//! Unification of categories and feature lists under index-linked
//! substitution.
//!
//! Failure is ordinary control flow here: every function returns `None` when
//! the operands don't unify, and callers simply decline to contribute a
//! derivation. The `banned` index set is the occurs check: while a
//! variable's restriction is being unified, its own index is banned, so a
//! variable can never end up bound to a structure containing itself.

use crate::assignment::{Assignment, SubstData};
use crate::cat::Cat;
use crate::feature::{Feature, FeatureValue};

/// Substitution overlay for category variables.
pub type CatSubst = Assignment<Cat>;
/// Substitution overlay for shared feature-value sets.
pub type FeatSubst = Assignment<Vec<FeatureValue>>;

/// Intersection of two admissible value sets, keeping the first operand's
/// order.
fn intersect(v1: &[FeatureValue], v2: &[FeatureValue]) -> Vec<FeatureValue> {
  v1.iter().copied().filter(|v| v2.contains(v)).collect()
}

/// Unifies two features, updating `fsub` with any sharing-key bindings.
pub fn unify_feature(fsub: &mut FeatSubst, f1: &Feature, f2: &Feature) -> Option<Feature> {
  match (f1, f2) {
    (Feature::Shared(i, v1), Feature::Shared(j, v2)) if i == j => {
      let (i2, v1r) = fsub.fetch(*i, v1);
      let v3 = intersect(&v1r, v2);
      if v3.is_empty() {
        return None;
      }
      fsub.bind(i2, SubstData::Val(v3.clone()));
      Some(Feature::Shared(i2, v3))
    }
    (Feature::Shared(i, v1), Feature::Shared(j, v2)) => {
      let (i2, v1r) = fsub.fetch(*i, v1);
      let (j2, v2r) = fsub.fetch(*j, v2);
      let v3 = intersect(&v1r, &v2r);
      if v3.is_empty() {
        return None;
      }
      // the two keys may already share a canonical index
      let smaller = i2.min(j2);
      let larger = i2.max(j2);
      fsub.bind(smaller, SubstData::Val(v3.clone()));
      if larger != smaller {
        fsub.bind(larger, SubstData::Link(smaller));
      }
      Some(Feature::Shared(smaller, v3))
    }
    (Feature::Shared(i, v1), Feature::Plain(v2)) => {
      let (i2, v1r) = fsub.fetch(*i, v1);
      let v3 = intersect(&v1r, v2);
      if v3.is_empty() {
        return None;
      }
      fsub.bind(i2, SubstData::Val(v3.clone()));
      Some(Feature::Shared(i2, v3))
    }
    (Feature::Plain(v1), Feature::Shared(j, v2)) => {
      let (j2, v2r) = fsub.fetch(*j, v2);
      let v3 = intersect(v1, &v2r);
      if v3.is_empty() {
        return None;
      }
      fsub.bind(j2, SubstData::Val(v3.clone()));
      Some(Feature::Shared(j2, v3))
    }
    (Feature::Plain(v1), Feature::Plain(v2)) => {
      let v3 = intersect(v1, v2);
      if v3.is_empty() { None } else { Some(Feature::Plain(v3)) }
    }
  }
}

/// Position-wise unification of two feature lists. Fails on length mismatch
/// or on the first failing position; there is no backtracking.
pub fn unify_features(fsub: &mut FeatSubst, fs1: &[Feature], fs2: &[Feature]) -> Option<Vec<Feature>> {
  if fs1.len() != fs2.len() {
    return None;
  }
  fs1
    .iter()
    .zip(fs2.iter())
    .map(|(f1, f2)| unify_feature(fsub, f1, f2))
    .collect()
}

/// Unifies two categories under the given substitution overlays, resolving
/// any top-level bound variable on either side first.
pub fn unify_category(
  csub: &mut CatSubst,
  fsub: &mut FeatSubst,
  banned: &[usize],
  c1: &Cat,
  c2: &Cat,
) -> Option<Cat> {
  let c1 = match c1 {
    Cat::T { index, .. } => csub.fetch(*index, c1).1,
    other => other.clone(),
  };
  let c2 = match c2 {
    Cat::T { index, .. } => csub.fetch(*index, c2).1,
    other => other.clone(),
  };
  unify_resolved(csub, fsub, banned, &c1, &c2)
}

/// Structural dispatch after top-level resolution.
fn unify_resolved(
  csub: &mut CatSubst,
  fsub: &mut FeatSubst,
  banned: &[usize],
  c1: &Cat,
  c2: &Cat,
) -> Option<Cat> {
  match (c1, c2) {
    (
      Cat::T { head: h1, index: i, restr: u1 },
      Cat::T { head: h2, index: j, restr: u2 },
    ) => {
      if banned.contains(i) || banned.contains(j) {
        return None;
      }
      if i == j {
        return Some(c1.clone());
      }
      let smaller = *i.min(j);
      let larger = *i.max(j);
      let mut inner_banned = banned.to_vec();
      inner_banned.push(smaller);
      // when exactly one side is head-restricted, its restriction only has
      // to match the other restriction's ultimate head
      let u3 = match (h1, h2) {
        (true, false) => unify_with_head(csub, fsub, &inner_banned, u1, u2)?,
        (false, true) => unify_with_head(csub, fsub, &inner_banned, u2, u1)?,
        _ => unify_resolved(csub, fsub, &inner_banned, u1, u2)?,
      };
      let result = Cat::T {
        head: *h1 && *h2,
        index: smaller,
        restr: Box::new(u3),
      };
      csub.bind(larger, SubstData::Link(smaller));
      csub.bind(smaller, SubstData::Val(result.clone()));
      Some(result)
    }
    (Cat::T { head, index, restr }, concrete) | (concrete, Cat::T { head, index, restr }) => {
      if banned.contains(index) {
        return None;
      }
      let mut inner_banned = banned.to_vec();
      inner_banned.push(*index);
      let bound = if *head {
        unify_with_head(csub, fsub, &inner_banned, restr, concrete)?
      } else {
        unify_category(csub, fsub, &inner_banned, restr, concrete)?
      };
      csub.bind(*index, SubstData::Val(bound.clone()));
      Some(bound)
    }
    (Cat::NP(f1), Cat::NP(f2)) => Some(Cat::NP(unify_features(fsub, f1, f2)?)),
    (Cat::S(f1), Cat::S(f2)) => Some(Cat::S(unify_features(fsub, f1, f2)?)),
    (Cat::Sbar(f1), Cat::Sbar(f2)) => Some(Cat::Sbar(unify_features(fsub, f1, f2)?)),
    (Cat::Slash(x1, y1), Cat::Slash(x2, y2)) => {
      // argument before result: the result step may depend on bindings the
      // argument step introduced
      let y3 = unify_category(csub, fsub, banned, y1, y2)?;
      let x3 = unify_category(csub, fsub, banned, x1, x2)?;
      Some(Cat::slash(x3, y3))
    }
    (Cat::Bslash(x1, y1), Cat::Bslash(x2, y2)) => {
      let y3 = unify_category(csub, fsub, banned, y1, y2)?;
      let x3 = unify_category(csub, fsub, banned, x1, x2)?;
      Some(Cat::bslash(x3, y3))
    }
    (Cat::N, Cat::N) => Some(Cat::N),
    (Cat::Conj, Cat::Conj) => Some(Cat::Conj),
    (Cat::LParen, Cat::LParen) => Some(Cat::LParen),
    (Cat::RParen, Cat::RParen) => Some(Cat::RParen),
    _ => None,
  }
}

/// Unifies a head-restricted variable's restriction `c1` against the
/// ultimate head of `c2`: argument layers of `c2` are stripped one at a
/// time, preserved, and rewrapped unchanged around the unified head.
pub fn unify_with_head(
  csub: &mut CatSubst,
  fsub: &mut FeatSubst,
  banned: &[usize],
  c1: &Cat,
  c2: &Cat,
) -> Option<Cat> {
  match c2 {
    Cat::Slash(x, y) => {
      let x2 = unify_with_head(csub, fsub, banned, c1, x)?;
      Some(Cat::Slash(Box::new(x2), y.clone()))
    }
    Cat::Bslash(x, y) => {
      let x2 = unify_with_head(csub, fsub, banned, c1, x)?;
      Some(Cat::Bslash(Box::new(x2), y.clone()))
    }
    Cat::T { head, index, restr } => {
      if banned.contains(index) {
        return None;
      }
      let mut inner_banned = banned.to_vec();
      inner_banned.push(*index);
      let x2 = unify_category(csub, fsub, &inner_banned, c1, restr)?;
      let result = Cat::T {
        head: *head,
        index: *index,
        restr: Box::new(x2),
      };
      csub.bind(*index, SubstData::Val(result.clone()));
      Some(result)
    }
    _ => unify_category(csub, fsub, banned, c1, c2),
  }
}

/// Materializes a category: structurally replaces every resolvable variable
/// and shared feature with its currently bound value. Applied once to a
/// rule's output after unification succeeds.
pub fn substitute(csub: &CatSubst, fsub: &FeatSubst, c: &Cat) -> Cat {
  match c {
    Cat::T { index, .. } => csub.fetch(*index, c).1,
    Cat::Slash(a, b) => Cat::slash(substitute(csub, fsub, a), substitute(csub, fsub, b)),
    Cat::Bslash(a, b) => Cat::bslash(substitute(csub, fsub, a), substitute(csub, fsub, b)),
    Cat::S(fs) => Cat::S(substitute_features(fsub, fs)),
    Cat::Sbar(fs) => Cat::Sbar(substitute_features(fsub, fs)),
    Cat::NP(fs) => Cat::NP(substitute_features(fsub, fs)),
    other => other.clone(),
  }
}

fn substitute_feature(fsub: &FeatSubst, f: &Feature) -> Feature {
  match f {
    Feature::Shared(i, vs) => {
      let (j, vs2) = fsub.fetch(*i, vs);
      Feature::Shared(j, vs2)
    }
    plain => plain.clone(),
  }
}

pub fn substitute_features(fsub: &FeatSubst, fs: &[Feature]) -> Vec<Feature> {
  fs.iter().map(|f| substitute_feature(fsub, f)).collect()
}

/// Convenience wrapper unifying two categories under fresh overlays.
pub fn unifiable(c1: &Cat, c2: &Cat) -> bool {
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  unify_category(&mut csub, &mut fsub, &[], c1, c2).is_some()
}
