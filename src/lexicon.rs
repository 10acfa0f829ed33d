//! The lexicon: surface-keyed lexical entries plus the empty categories
//! that may be inserted at any chart position.
//!
//! Category templates for the open word classes live here too, so that
//! callers building a lexicon spell out only what varies per word.

use std::rc::Rc;

use crate::cat::Cat;
use crate::feature::{Feature, FeatureValue};
use crate::node::Node;

lazy_static! {
  /// Every verbal conjugation class.
  pub static ref VERB: Vec<FeatureValue> = {
    use FeatureValue::*;
    vec![
      V5k, V5s, V5t, V5n, V5m, V5r, V5w, V5g, V5z, V5b, V5IKU, V5YUK, V5ARU,
      V5NAS, V5TOW, V1, VK, VS, VSN, VZ, VURU,
    ]
  };

  /// Every adjectival conjugation class.
  pub static ref ADJECTIVE: Vec<FeatureValue> = {
    use FeatureValue::*;
    vec![Aauo, Ai, ANAS, ATII, ABES]
  };

  /// Every nominal-predicate class.
  pub static ref NOMINAL_PREDICATE: Vec<FeatureValue> = {
    use FeatureValue::*;
    vec![Nda, Nna, Nno, Ntar, Nni, Nemp, Nto]
  };

  /// Union of all predicate classes.
  pub static ref ANY_POS: Vec<FeatureValue> = {
    let mut vs = VERB.clone();
    vs.extend_from_slice(&ADJECTIVE);
    vs.extend_from_slice(&NOMINAL_PREDICATE);
    vs.push(FeatureValue::Exp);
    vs
  };

  /// Conjugation forms other than the bare stems.
  pub static ref NON_STEM: Vec<FeatureValue> = {
    use FeatureValue::*;
    vec![
      Neg, Cont, Term, Attr, Hyp, Imper, Pre, NStem, VoR, VoS, VoE, NegL,
      TeForm,
    ]
  };
}

/// A sentence category open enough to be the target of modification:
/// any predicate class, any non-stem form, underspecified polarity slots.
/// Sharing keys start at 2; key 1 is reserved for the variable head of
/// the categories built around this template.
pub fn modifiable_s() -> Cat {
  use FeatureValue::{M, P};
  Cat::S(vec![
    Feature::Shared(2, ANY_POS.clone()),
    Feature::Shared(3, NON_STEM.clone()),
    Feature::Shared(4, vec![P, M]),
    Feature::Shared(5, vec![P, M]),
    Feature::Shared(6, vec![P, M]),
    Feature::Plain(vec![M]),
    Feature::Plain(vec![M]),
  ])
}

/// A sentence category with the given predicate class and conjugation
/// form, all five trailing slots negative.
pub fn def_s(pos: Vec<FeatureValue>, conj: Vec<FeatureValue>) -> Cat {
  let m = Feature::Plain(vec![FeatureValue::M]);
  Cat::S(vec![
    Feature::Plain(pos),
    Feature::Plain(conj),
    m.clone(),
    m.clone(),
    m.clone(),
    m.clone(),
    m,
  ])
}

/// The category of a plain one-place predicate, `S\NPga`.
pub fn construct_predicate(pos: Vec<FeatureValue>, conj: Vec<FeatureValue>) -> Cat {
  Cat::bslash(
    def_s(pos, conj),
    Cat::NP(vec![Feature::Plain(vec![FeatureValue::Ga])]),
  )
}

/// Lexical entries keyed by surface form, plus the empty categories
/// considered at every chart position.
#[derive(Debug, Clone)]
pub struct Lexicon {
  pub items: Vec<Rc<Node>>,
  pub empty_categories: Vec<Rc<Node>>,
}

impl Lexicon {
  pub fn new(items: Vec<Rc<Node>>, empty_categories: Vec<Rc<Node>>) -> Self {
    Self {
      items,
      empty_categories,
    }
  }

  /// All entries whose surface form is exactly `word`.
  pub fn lookup(&self, word: &str) -> Vec<Rc<Node>> {
    self
      .items
      .iter()
      .filter(|n| n.surface == word)
      .cloned()
      .collect()
  }

  /// A copy restricted to the entries that can occur in `sentence` at
  /// all. Chart lookup is repeated for every span, so narrowing once up
  /// front pays for itself on any non-trivial lexicon.
  pub fn filtered_for(&self, sentence: &str) -> Lexicon {
    Lexicon {
      items: self
        .items
        .iter()
        .filter(|n| sentence.contains(n.surface.as_str()))
        .cloned()
        .collect(),
      empty_categories: self.empty_categories.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use FeatureValue::{Ga, M, Nc, Term, V5k};

  #[test]
  fn test_def_s_shape() {
    let s = def_s(vec![V5k], vec![Term]);
    match s {
      Cat::S(fs) => {
        assert_eq!(fs.len(), 7);
        assert_eq!(fs[0], Feature::Plain(vec![V5k]));
        assert_eq!(fs[1], Feature::Plain(vec![Term]));
        for f in &fs[2..] {
          assert_eq!(*f, Feature::Plain(vec![M]));
        }
      }
      other => panic!("expected S, got {}", other),
    }
  }

  #[test]
  fn test_construct_predicate() {
    let cat = construct_predicate(vec![V5k], vec![Term]);
    assert_eq!(
      cat,
      Cat::bslash(
        def_s(vec![V5k], vec![Term]),
        Cat::NP(vec![Feature::Plain(vec![Ga])]),
      )
    );
    assert_eq!(cat.number_of_arguments(), 1);
    assert!(cat.is_bunsetsu());
  }

  #[test]
  fn test_modifiable_s_accepts_any_predicate() {
    let s = modifiable_s();
    assert_eq!(s.maximum_index(), 6);
    // a concrete terminal verb unifies with the template
    assert!(crate::unify::unifiable(&def_s(vec![V5k], vec![Term]), &s));
  }

  #[test]
  fn test_lookup_and_filtering() {
    let np = |v| Cat::NP(vec![Feature::Plain(vec![v])]);
    let lexicon = Lexicon::new(
      vec![
        Rc::new(Node::lexical("パン", "demo", 97, np(Nc))),
        Rc::new(Node::lexical("僕が", "demo", 97, np(Ga))),
        Rc::new(Node::lexical(
          "行く",
          "demo",
          96,
          construct_predicate(vec![V5k], vec![Term]),
        )),
      ],
      vec![],
    );

    assert_eq!(lexicon.lookup("パン").len(), 1);
    assert_eq!(lexicon.lookup("パ").len(), 0);
    assert_eq!(lexicon.lookup("未知").len(), 0);

    let narrowed = lexicon.filtered_for("僕が行く");
    assert_eq!(narrowed.items.len(), 2);
    assert!(narrowed.lookup("パン").is_empty());
    assert_eq!(narrowed.lookup("行く").len(), 1);
  }
}
