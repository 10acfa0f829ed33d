//! The combinatory rule set.
//!
//! Every rule is a stateless function from two (or three) derivation nodes
//! to at most one new node, prepended to an accumulator. A single node pair
//! may license several rules at once; the dispatch list applies all of them
//! in a fixed order. Unification failure means the rule silently declines.
//!
//! Before combining, the functor operand's indices are shifted past the
//! other operand's maximum index so the two index spaces are disjoint.

use std::rc::Rc;

use crate::cat::Cat;
use crate::feature::{Feature, FeatureValue};
use crate::node::{Node, RuleSymbol};
use crate::unify::{substitute, unify_category, CatSubst, FeatSubst};

/// Score penalty applied by the crossed composition and crossed
/// substitution rules. The non-canonical word orders these rules admit are
/// rare enough that their readings should lose to any canonical derivation.
pub const CROSSED_RULE_PENALTY: f64 = 0.01;

/// Damping applied when a node is lifted through the declarative wrap
/// during result extraction.
pub const WRAP_DAMPING: f64 = 0.9;

pub type BinaryRule = fn(&Rc<Node>, &Rc<Node>, &mut Vec<Rc<Node>>);

/// The binary rules in dispatch order. Applications first, then plain
/// composition by depth, then the penalized crossed rules.
pub const BINARY_RULES: &[BinaryRule] = &[
  forward_application,
  backward_application,
  forward_composition1,
  backward_composition1,
  forward_composition2,
  backward_composition2,
  forward_composition3,
  backward_composition3,
  forward_crossed_composition1,
  forward_crossed_composition2,
  forward_crossed_substitution,
];

/// Applies every binary rule to the pair, accumulating all licensed nodes.
pub fn binary_rules(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  for rule in BINARY_RULES {
    rule(left, right, acc);
  }
}

/// Unary rules are an extension point; none are currently defined.
pub fn unary_rules(_node: &Rc<Node>, _acc: &mut Vec<Rc<Node>>) {}

/// Outputs of the forward composition rules; they may not feed the forward
/// rules again on the consuming side, which would re-derive the same chain.
const FORWARD_COMPOSITIONS: &[RuleSymbol] = &[RuleSymbol::Ffc1, RuleSymbol::Ffc2, RuleSymbol::Ffc3];
/// Same guard for the backward composition rules.
const BACKWARD_COMPOSITIONS: &[RuleSymbol] = &[RuleSymbol::Bfc1, RuleSymbol::Bfc2, RuleSymbol::Bfc3];

fn derived(rule: RuleSymbol, cat: Cat, score: f64, children: Vec<Rc<Node>>) -> Rc<Node> {
  let surface = children.iter().map(|c| c.surface.as_str()).collect();
  Rc::new(Node {
    rule,
    surface,
    cat,
    children,
    score,
    source: String::new(),
  })
}

/// Forward function application: `X/Y  Y  =>  X`.
pub fn forward_application(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if FORWARD_COMPOSITIONS.contains(&left.rule) {
    return;
  }
  let (x, y1) = match &left.cat {
    Cat::Slash(x, y1) => (x, y1),
    _ => return,
  };
  // a closed variable in argument position would accept anything
  if matches!(**y1, Cat::T { head: true, .. }) {
    return;
  }
  let inc = right.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  if unify_category(&mut csub, &mut fsub, &[], &right.cat, &y1.increment_index(inc)).is_none() {
    return;
  }
  let newcat = substitute(&csub, &fsub, &x.increment_index(inc));
  acc.insert(
    0,
    derived(
      RuleSymbol::Ffa,
      newcat,
      left.score * right.score,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Backward function application: `Y  X\Y  =>  X`.
pub fn backward_application(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if BACKWARD_COMPOSITIONS.contains(&right.rule) {
    return;
  }
  let (x, y2) = match &right.cat {
    Cat::Bslash(x, y2) => (x, y2),
    _ => return,
  };
  let inc = left.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  if unify_category(&mut csub, &mut fsub, &[], &left.cat, &y2.increment_index(inc)).is_none() {
    return;
  }
  let newcat = substitute(&csub, &fsub, &x.increment_index(inc));
  acc.insert(
    0,
    derived(
      RuleSymbol::Bfa,
      newcat,
      left.score * right.score,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Forward function composition: `X/Y  Y/Z  =>  X/Z`.
pub fn forward_composition1(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if FORWARD_COMPOSITIONS.contains(&left.rule) {
    return;
  }
  let ((x, y1), (y2, z)) = match (&left.cat, &right.cat) {
    (Cat::Slash(x, y1), Cat::Slash(y2, z)) => ((x, y1), (y2, z)),
    _ => return,
  };
  if y1.is_t_noncase_np() {
    return;
  }
  let inc = right.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  if unify_category(&mut csub, &mut fsub, &[], y2, &y1.increment_index(inc)).is_none() {
    return;
  }
  let z2 = substitute(&csub, &fsub, z);
  if z2.number_of_arguments() > 3 {
    return;
  }
  let newcat = Cat::slash(substitute(&csub, &fsub, &x.increment_index(inc)), z2);
  acc.insert(
    0,
    derived(
      RuleSymbol::Ffc1,
      newcat,
      left.score * right.score,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Backward function composition: `Y\Z  X\Y  =>  X\Z`.
pub fn backward_composition1(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if BACKWARD_COMPOSITIONS.contains(&right.rule) {
    return;
  }
  let ((y1, z), (x, y2)) = match (&left.cat, &right.cat) {
    (Cat::Bslash(y1, z), Cat::Bslash(x, y2)) => ((y1, z), (x, y2)),
    _ => return,
  };
  let inc = left.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  if unify_category(&mut csub, &mut fsub, &[], y1, &y2.increment_index(inc)).is_none() {
    return;
  }
  let newcat = substitute(
    &csub,
    &fsub,
    &Cat::bslash(x.increment_index(inc), (**z).clone()),
  );
  acc.insert(
    0,
    derived(
      RuleSymbol::Bfc1,
      newcat,
      left.score * right.score,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Forward function composition, depth 2: `X/Y  (Y/Z1)/Z2  =>  (X/Z1)/Z2`.
pub fn forward_composition2(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if FORWARD_COMPOSITIONS.contains(&left.rule) {
    return;
  }
  let ((x, y1), (y2, z1, z2)) = match (&left.cat, &right.cat) {
    (Cat::Slash(x, y1), Cat::Slash(inner, z2)) => match &**inner {
      Cat::Slash(y2, z1) => ((x, y1), (y2, z1, z2)),
      _ => return,
    },
    _ => return,
  };
  if y1.is_t_noncase_np() {
    return;
  }
  let inc = right.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  if unify_category(&mut csub, &mut fsub, &[], &y1.increment_index(inc), y2).is_none() {
    return;
  }
  let z1s = substitute(&csub, &fsub, z1);
  if z1s.number_of_arguments() > 2 {
    return;
  }
  let newcat = substitute(
    &csub,
    &fsub,
    &Cat::slash(Cat::slash(x.increment_index(inc), z1s), (**z2).clone()),
  );
  acc.insert(
    0,
    derived(
      RuleSymbol::Ffc2,
      newcat,
      left.score * right.score,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Backward function composition, depth 2: `(Y\Z1)\Z2  X\Y  =>  (X\Z1)\Z2`.
pub fn backward_composition2(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if BACKWARD_COMPOSITIONS.contains(&right.rule) {
    return;
  }
  let ((y1, z1, z2), (x, y2)) = match (&left.cat, &right.cat) {
    (Cat::Bslash(inner, z2), Cat::Bslash(x, y2)) => match &**inner {
      Cat::Bslash(y1, z1) => ((y1, z1, z2), (x, y2)),
      _ => return,
    },
    _ => return,
  };
  let inc = left.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  if unify_category(&mut csub, &mut fsub, &[], &y2.increment_index(inc), y1).is_none() {
    return;
  }
  let newcat = substitute(
    &csub,
    &fsub,
    &Cat::bslash(
      Cat::bslash(x.increment_index(inc), (**z1).clone()),
      (**z2).clone(),
    ),
  );
  acc.insert(
    0,
    derived(
      RuleSymbol::Bfc2,
      newcat,
      left.score * right.score,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Forward function composition, depth 3:
/// `X/Y  ((Y/Z1)/Z2)/Z3  =>  ((X/Z1)/Z2)/Z3`.
pub fn forward_composition3(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if FORWARD_COMPOSITIONS.contains(&left.rule) {
    return;
  }
  let ((x, y1), (y2, z1, z2, z3)) = match (&left.cat, &right.cat) {
    (Cat::Slash(x, y1), Cat::Slash(inner2, z3)) => match &**inner2 {
      Cat::Slash(inner1, z2) => match &**inner1 {
        Cat::Slash(y2, z1) => ((x, y1), (y2, z1, z2, z3)),
        _ => return,
      },
      _ => return,
    },
    _ => return,
  };
  if y1.is_t_noncase_np() {
    return;
  }
  let inc = right.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  if unify_category(&mut csub, &mut fsub, &[], &y1.increment_index(inc), y2).is_none() {
    return;
  }
  let z1s = substitute(&csub, &fsub, z1);
  if z1s.number_of_arguments() > 3 {
    return;
  }
  let newcat = substitute(
    &csub,
    &fsub,
    &Cat::slash(
      Cat::slash(Cat::slash(x.increment_index(inc), z1s), (**z2).clone()),
      (**z3).clone(),
    ),
  );
  acc.insert(
    0,
    derived(
      RuleSymbol::Ffc3,
      newcat,
      left.score * right.score,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Backward function composition, depth 3:
/// `((Y\Z1)\Z2)\Z3  X\Y  =>  ((X\Z1)\Z2)\Z3`.
pub fn backward_composition3(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if BACKWARD_COMPOSITIONS.contains(&right.rule) {
    return;
  }
  let ((y1, z1, z2, z3), (x, y2)) = match (&left.cat, &right.cat) {
    (Cat::Bslash(inner2, z3), Cat::Bslash(x, y2)) => match &**inner2 {
      Cat::Bslash(inner1, z2) => match &**inner1 {
        Cat::Bslash(y1, z1) => ((y1, z1, z2, z3), (x, y2)),
        _ => return,
      },
      _ => return,
    },
    _ => return,
  };
  let inc = left.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  if unify_category(&mut csub, &mut fsub, &[], &y2.increment_index(inc), y1).is_none() {
    return;
  }
  let newcat = substitute(
    &csub,
    &fsub,
    &Cat::bslash(
      Cat::bslash(
        Cat::bslash(x.increment_index(inc), (**z1).clone()),
        (**z2).clone(),
      ),
      (**z3).clone(),
    ),
  );
  acc.insert(
    0,
    derived(
      RuleSymbol::Bfc3,
      newcat,
      left.score * right.score,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Forward crossed composition: `X/Y  Y\Z  =>  X\Z`, penalized.
pub fn forward_crossed_composition1(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if FORWARD_COMPOSITIONS.contains(&right.rule) {
    return;
  }
  let ((x, y1), (y2, z)) = match (&left.cat, &right.cat) {
    (Cat::Slash(x, y1), Cat::Bslash(y2, z)) => ((x, y1), (y2, z)),
    _ => return,
  };
  if y1.is_t_noncase_np() || !z.is_argument_category() {
    return;
  }
  let inc = right.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  if unify_category(&mut csub, &mut fsub, &[], y2, &y1.increment_index(inc)).is_none() {
    return;
  }
  let z2 = substitute(&csub, &fsub, z);
  let newcat = Cat::bslash(substitute(&csub, &fsub, &x.increment_index(inc)), z2);
  acc.insert(
    0,
    derived(
      RuleSymbol::Ffcx1,
      newcat,
      left.score * right.score * CROSSED_RULE_PENALTY,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Forward crossed composition, depth 2:
/// `X/Y  (Y\Z1)\Z2  =>  (X\Z1)\Z2`, penalized.
pub fn forward_crossed_composition2(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if FORWARD_COMPOSITIONS.contains(&right.rule) || right.rule == RuleSymbol::Ec {
    return;
  }
  let ((x, y1), (y2, z1, z2)) = match (&left.cat, &right.cat) {
    (Cat::Slash(x, y1), Cat::Bslash(inner, z2)) => match &**inner {
      Cat::Bslash(y2, z1) => ((x, y1), (y2, z1, z2)),
      _ => return,
    },
    _ => return,
  };
  if y1.is_t_noncase_np() || !z1.is_argument_category() || !z2.is_argument_category() {
    return;
  }
  let inc = right.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  if unify_category(&mut csub, &mut fsub, &[], &y1.increment_index(inc), y2).is_none() {
    return;
  }
  let z1s = substitute(&csub, &fsub, z1);
  if z1s.number_of_arguments() > 2 {
    return;
  }
  let newcat = substitute(
    &csub,
    &fsub,
    &Cat::bslash(Cat::bslash(x.increment_index(inc), z1s), (**z2).clone()),
  );
  acc.insert(
    0,
    derived(
      RuleSymbol::Ffcx2,
      newcat,
      left.score * right.score * CROSSED_RULE_PENALTY,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Forward crossed substitution: `(X/Y)\Z  Y\Z  =>  X\Z`, penalized.
/// Both exposed argument slots unify; the second unification is chained
/// on the environment left by the first.
pub fn forward_crossed_substitution(left: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  let ((x, y1, z1), (y2, z2)) = match (&left.cat, &right.cat) {
    (Cat::Bslash(inner, z1), Cat::Bslash(y2, z2)) => match &**inner {
      Cat::Slash(x, y1) => ((x, y1, z1), (y2, z2)),
      _ => return,
    },
    _ => return,
  };
  if !z1.is_argument_category() || !z2.is_argument_category() {
    return;
  }
  let inc = right.cat.maximum_index();
  let mut csub = CatSubst::new();
  let mut fsub = FeatSubst::new();
  let z = match unify_category(&mut csub, &mut fsub, &[], &z1.increment_index(inc), z2) {
    Some(z) => z,
    None => return,
  };
  if unify_category(&mut csub, &mut fsub, &[], &y1.increment_index(inc), y2).is_none() {
    return;
  }
  let newcat = substitute(&csub, &fsub, &Cat::bslash(x.increment_index(inc), z));
  acc.insert(
    0,
    derived(
      RuleSymbol::Ffsx,
      newcat,
      left.score * right.score * CROSSED_RULE_PENALTY,
      vec![left.clone(), right.clone()],
    ),
  );
}

/// Coordination: `X  CONJ  X  =>  X` for categories that end in a variable
/// or a nominal stem. Refuses to re-consume its own output on the left.
pub fn coordination(left: &Rc<Node>, conj: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if left.rule == RuleSymbol::Coord {
    return;
  }
  if (right.cat.ends_with_t() || right.cat.is_n_stem()) && left.cat == right.cat {
    acc.insert(
      0,
      derived(
        RuleSymbol::Coord,
        right.cat.clone(),
        left.score * right.score,
        vec![left.clone(), conj.clone(), right.clone()],
      ),
    );
  }
}

/// Parenthesis: `LPAREN  X  RPAREN  =>  X`, score unchanged.
pub fn parenthesis(left: &Rc<Node>, center: &Rc<Node>, right: &Rc<Node>, acc: &mut Vec<Rc<Node>>) {
  if left.cat == Cat::LParen && right.cat == Cat::RParen {
    acc.insert(
      0,
      derived(
        RuleSymbol::Paren,
        center.cat.clone(),
        center.score,
        vec![left.clone(), center.clone(), right.clone()],
      ),
    );
  }
}

/// Lifts a node into a root declarative sentence with a damped score.
pub fn wrap_node(node: &Rc<Node>) -> Rc<Node> {
  Rc::new(Node {
    rule: RuleSymbol::Wrap,
    surface: node.surface.clone(),
    cat: Cat::Sbar(vec![Feature::Plain(vec![FeatureValue::Decl])]),
    children: vec![node.clone()],
    score: node.score * WRAP_DAMPING,
    source: String::new(),
  })
}

/// Conjoins two adjacent partial parses; the right node's category wins.
pub fn conjoin_nodes(left: &Rc<Node>, right: &Rc<Node>) -> Rc<Node> {
  derived(
    RuleSymbol::Dc,
    right.cat.clone(),
    left.score * right.score,
    vec![left.clone(), right.clone()],
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn np(vs: Vec<FeatureValue>) -> Cat {
    Cat::NP(vec![Feature::Plain(vs)])
  }

  fn lex(surface: &str, score: i64, cat: Cat) -> Rc<Node> {
    Rc::new(Node::lexical(surface, "", score, cat))
  }

  #[test]
  fn test_forward_application() {
    use FeatureValue::Nc;
    let left = lex("美味しい", 98, Cat::slash(np(vec![Nc]), np(vec![Nc])));
    let right = lex("パン", 97, np(vec![Nc]));

    let mut acc = Vec::new();
    forward_application(&left, &right, &mut acc);

    assert_eq!(acc.len(), 1);
    let node = &acc[0];
    assert_eq!(node.rule, RuleSymbol::Ffa);
    assert_eq!(node.surface, "美味しいパン");
    assert_eq!(node.cat, np(vec![Nc]));
    assert_eq!(node.children, vec![left.clone(), right.clone()]);
    assert!((node.score - 0.9506).abs() < 1e-9);
  }

  #[test]
  fn test_forward_application_rejects_closed_variable_argument() {
    use FeatureValue::Nc;
    let closed = Cat::var(true, 1, Cat::Sbar(vec![]));
    let left = lex("", 98, Cat::slash(np(vec![Nc]), closed));
    let right = lex("パン", 97, np(vec![Nc]));
    let mut acc = Vec::new();
    forward_application(&left, &right, &mut acc);
    assert!(acc.is_empty());
  }

  #[test]
  fn test_backward_application() {
    use FeatureValue::{Ga, Term, V5k};
    let left = lex("僕が", 97, np(vec![Ga]));
    let s = Cat::S(vec![Feature::Plain(vec![V5k]), Feature::Plain(vec![Term])]);
    let right = lex("行く", 96, Cat::bslash(s.clone(), np(vec![Ga])));

    let mut acc = Vec::new();
    backward_application(&left, &right, &mut acc);

    assert_eq!(acc.len(), 1);
    let node = &acc[0];
    assert_eq!(node.rule, RuleSymbol::Bfa);
    assert_eq!(node.surface, "僕が行く");
    assert_eq!(node.cat, s);
    assert!((node.score - 0.9312).abs() < 1e-9);
  }

  #[test]
  fn test_forward_composition1() {
    use FeatureValue::Nc;
    let modifier = Cat::slash(np(vec![Nc]), np(vec![Nc]));
    let left = lex("大きな", 98, modifier.clone());
    let right = lex("赤い", 97, modifier.clone());

    let mut acc = Vec::new();
    forward_composition1(&left, &right, &mut acc);

    assert_eq!(acc.len(), 1);
    let node = &acc[0];
    assert_eq!(node.rule, RuleSymbol::Ffc1);
    assert_eq!(node.cat, modifier);
    assert!((node.score - 0.9506).abs() < 1e-9);
  }

  #[test]
  fn test_composed_output_does_not_feed_forward_rules() {
    use FeatureValue::Nc;
    let modifier = Cat::slash(np(vec![Nc]), np(vec![Nc]));
    let a = lex("a", 98, modifier.clone());
    let b = lex("b", 97, modifier.clone());
    let mut acc = Vec::new();
    forward_composition1(&a, &b, &mut acc);
    let composed = acc[0].clone();

    let mut acc = Vec::new();
    forward_composition1(&composed, &b, &mut acc);
    assert!(acc.is_empty());

    let mut acc = Vec::new();
    forward_application(&composed, &lex("c", 96, np(vec![Nc])), &mut acc);
    assert!(acc.is_empty());
  }

  #[test]
  fn test_backward_composition1() {
    use FeatureValue::{ABES, ANAS, ATII, Aauo, Ai, Attr, Ga, M, P, Term};
    let adjective = vec![Aauo, Ai, ANAS, ATII, ABES];
    let m = Feature::Plain(vec![M]);
    // 長い := S[Ai, Term|Attr] \ NP[Ga]
    let nagai = Cat::bslash(
      Cat::S(vec![
        Feature::Plain(vec![Ai]),
        Feature::Plain(vec![Term, Attr]),
        m.clone(),
        m.clone(),
        m.clone(),
        m.clone(),
        m.clone(),
      ]),
      np(vec![Ga]),
    );
    // です := S[<1>adj, Term, <2>[P,M], P] \ S[<1>adj, Term, <2>[P,M]]
    let desu = Cat::bslash(
      Cat::S(vec![
        Feature::Shared(1, adjective.clone()),
        Feature::Plain(vec![Term]),
        Feature::Shared(2, vec![P, M]),
        Feature::Plain(vec![P]),
        m.clone(),
        m.clone(),
        m.clone(),
      ]),
      Cat::S(vec![
        Feature::Shared(1, adjective.clone()),
        Feature::Plain(vec![Term]),
        Feature::Shared(2, vec![P, M]),
        m.clone(),
        m.clone(),
        m.clone(),
        m.clone(),
      ]),
    );
    let left = lex("長い", 90, nagai);
    let right = lex("です", 99, desu);

    let mut acc = Vec::new();
    backward_composition1(&left, &right, &mut acc);

    assert_eq!(acc.len(), 1);
    let node = &acc[0];
    assert_eq!(node.rule, RuleSymbol::Bfc1);
    assert_eq!(node.surface, "長いです");
    // the shared features narrowed to what 長い admits
    assert_eq!(
      node.cat,
      Cat::bslash(
        Cat::S(vec![
          Feature::Shared(1, vec![Ai]),
          Feature::Plain(vec![Term]),
          Feature::Shared(2, vec![M]),
          Feature::Plain(vec![P]),
          m.clone(),
          m.clone(),
          m.clone(),
        ]),
        np(vec![Ga]),
      )
    );
    assert!((node.score - 0.9 * 0.99).abs() < 1e-9);
  }

  #[test]
  fn test_forward_crossed_composition1_is_penalized() {
    use FeatureValue::{Ga, Nc};
    let left = lex("x", 98, Cat::slash(np(vec![Nc]), np(vec![Ga])));
    let right = lex("y", 97, Cat::bslash(np(vec![Ga]), np(vec![Ga])));

    let mut acc = Vec::new();
    forward_crossed_composition1(&left, &right, &mut acc);

    assert_eq!(acc.len(), 1);
    let node = &acc[0];
    assert_eq!(node.rule, RuleSymbol::Ffcx1);
    assert_eq!(node.cat, Cat::bslash(np(vec![Nc]), np(vec![Ga])));
    assert!((node.score - 0.98 * 0.97 * CROSSED_RULE_PENALTY).abs() < 1e-9);
  }

  #[test]
  fn test_crossed_composition_requires_argument_category() {
    use FeatureValue::{Ga, Nc};
    // z = NP[Nc] is not an argument category, so the rule declines
    let left = lex("x", 98, Cat::slash(np(vec![Nc]), np(vec![Ga])));
    let right = lex("y", 97, Cat::bslash(np(vec![Ga]), np(vec![Nc])));
    let mut acc = Vec::new();
    forward_crossed_composition1(&left, &right, &mut acc);
    assert!(acc.is_empty());
  }

  #[test]
  fn test_forward_crossed_substitution() {
    use FeatureValue::{Ga, Nc};
    let left = lex(
      "x",
      98,
      Cat::bslash(Cat::slash(np(vec![Nc]), np(vec![Ga])), np(vec![Ga])),
    );
    let right = lex("y", 97, Cat::bslash(np(vec![Ga]), np(vec![Ga])));

    let mut acc = Vec::new();
    forward_crossed_substitution(&left, &right, &mut acc);

    assert_eq!(acc.len(), 1);
    let node = &acc[0];
    assert_eq!(node.rule, RuleSymbol::Ffsx);
    assert_eq!(node.cat, Cat::bslash(np(vec![Nc]), np(vec![Ga])));
    assert!((node.score - 0.98 * 0.97 * CROSSED_RULE_PENALTY).abs() < 1e-9);
  }

  #[test]
  fn test_coordination() {
    use FeatureValue::Nc;
    // proper-name-like category ending in a variable
    let t = Cat::var(true, 1, Cat::S(vec![]));
    let pn = Cat::slash(t.clone(), Cat::bslash(t, np(vec![Nc])));
    let left = lex("太郎", 95, pn.clone());
    let conj = lex("と", 100, Cat::Conj);
    let right = lex("次郎", 94, pn.clone());

    let mut acc = Vec::new();
    coordination(&left, &conj, &right, &mut acc);

    assert_eq!(acc.len(), 1);
    let node = &acc[0];
    assert_eq!(node.rule, RuleSymbol::Coord);
    assert_eq!(node.surface, "太郎と次郎");
    assert_eq!(node.cat, pn);
    assert_eq!(node.children.len(), 3);
    assert!((node.score - 0.95 * 0.94).abs() < 1e-9);

    // a coordination result may not coordinate again on the left
    let coordinated = node.clone();
    let mut acc = Vec::new();
    coordination(&coordinated, &conj, &right, &mut acc);
    assert!(acc.is_empty());
  }

  #[test]
  fn test_coordination_requires_equal_categories() {
    use FeatureValue::{Ga, Nc};
    let t = Cat::var(true, 1, Cat::S(vec![]));
    let left = lex(
      "a",
      95,
      Cat::slash(t.clone(), Cat::bslash(t.clone(), np(vec![Nc]))),
    );
    let conj = lex("と", 100, Cat::Conj);
    let right = lex("b", 94, Cat::slash(t.clone(), Cat::bslash(t, np(vec![Ga]))));
    let mut acc = Vec::new();
    coordination(&left, &conj, &right, &mut acc);
    assert!(acc.is_empty());
  }

  #[test]
  fn test_parenthesis() {
    use FeatureValue::Nc;
    let left = lex("（", 100, Cat::LParen);
    let center = lex("パン", 97, np(vec![Nc]));
    let right = lex("）", 100, Cat::RParen);

    let mut acc = Vec::new();
    parenthesis(&left, &center, &right, &mut acc);

    assert_eq!(acc.len(), 1);
    let node = &acc[0];
    assert_eq!(node.rule, RuleSymbol::Paren);
    assert_eq!(node.cat, center.cat);
    assert_eq!(node.surface, "（パン）");
    assert!((node.score - center.score).abs() < 1e-12);
  }

  #[test]
  fn test_dispatch_accumulates_all_licensed_rules() {
    use FeatureValue::Nc;
    let modifier = Cat::slash(np(vec![Nc]), np(vec![Nc]));
    let left = lex("a", 98, modifier.clone());
    let right = lex("b", 97, modifier);
    let mut acc = Vec::new();
    binary_rules(&left, &right, &mut acc);
    assert_eq!(acc.len(), 1);
    assert_eq!(acc[0].rule, RuleSymbol::Ffc1);
  }

  #[test]
  fn test_wrap_and_conjoin() {
    use FeatureValue::{Decl, Nc};
    let node = lex("パン", 97, np(vec![Nc]));
    let wrapped = wrap_node(&node);
    assert_eq!(wrapped.rule, RuleSymbol::Wrap);
    assert_eq!(wrapped.cat, Cat::Sbar(vec![Feature::Plain(vec![Decl])]));
    assert!((wrapped.score - 0.97 * WRAP_DAMPING).abs() < 1e-9);

    let other = lex("走る", 95, np(vec![Nc]));
    let conjoined = conjoin_nodes(&node, &other);
    assert_eq!(conjoined.rule, RuleSymbol::Dc);
    assert_eq!(conjoined.surface, "パン走る");
    assert_eq!(conjoined.cat, other.cat);
    assert!((conjoined.score - 0.97 * 0.95).abs() < 1e-9);
  }
}
