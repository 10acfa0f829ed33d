//! Beam-pruned CYK-style chart filling.
//!
//! The chart maps character spans `(start, end)` of the normalized
//! sentence to candidate derivation nodes, best score first. Filling
//! proceeds one pivot at a time left to right; for each pivot the cell
//! for every span ending just after it is computed, combining a fresh
//! lexicon lookup with every rule over every split of the span, then
//! truncated to the beam width.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use regex::Regex;
use tracing::{debug, trace};

use crate::cat::Cat;
use crate::feature::{Feature, FeatureValue};
use crate::lexicon::{modifiable_s, Lexicon};
use crate::node::Node;
use crate::rules::{binary_rules, coordination, parenthesis, unary_rules};

/// Longest substring tried against the lexicon, in chars. Longer spans
/// still get cells, but only through rule combination.
pub const MAX_WORD_LEN: usize = 22;

/// helper macro for initializing a regex with lazy_static!
macro_rules! regex_static {
  ($name:ident, $pattern:expr) => {
    lazy_static! {
      static ref $name: Regex = Regex::new($pattern).unwrap();
    }
  };
}

/// Normalizes raw input before chart filling: whitespace and decorative
/// punctuation are deleted, foreign comma and dash variants become the
/// ideographic comma. Idempotent and never length-increasing.
pub fn purify_text(text: &str) -> String {
  regex_static!(
    DELETED,
    r"[\s！？!?…「」◎○●▲△▼▽■□◆◇★☆※†‡.]"
  );
  regex_static!(CANONICALIZED, r"[，,\-―／＼]");
  let text = DELETED.replace_all(text, "");
  CANONICALIZED.replace_all(&text, "、").into_owned()
}

fn is_separator(c: char) -> bool {
  c == '、' || c == '。'
}

/// A parse chart: candidate nodes per character span, best first.
#[derive(Debug, Clone, Default)]
pub struct Chart(HashMap<(usize, usize), Vec<Rc<Node>>>);

impl Chart {
  pub fn new() -> Self {
    Self(HashMap::new())
  }

  /// The candidates for a span, empty if none were derived.
  pub fn cell(&self, span: (usize, usize)) -> &[Rc<Node>] {
    self.0.get(&span).map(Vec::as_slice).unwrap_or(&[])
  }

  fn set_cell(&mut self, span: (usize, usize), nodes: Vec<Rc<Node>>) {
    if !nodes.is_empty() {
      self.0.insert(span, nodes);
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &Vec<Rc<Node>>)> {
    self.0.iter()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl fmt::Display for Chart {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut spans: Vec<_> = self.0.keys().collect();
    spans.sort();
    for span in spans {
      writeln!(f, "({}, {}):", span.0, span.1)?;
      for node in &self.0[span] {
        writeln!(f, "  {}", node)?;
      }
    }
    Ok(())
  }
}

/// Sorts best first and cuts to the beam width. The sort is stable, so
/// candidates prepended by earlier rules win ties against later ones.
fn prune(beam: usize, mut nodes: Vec<Rc<Node>>) -> Vec<Rc<Node>> {
  nodes.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
  nodes.truncate(beam);
  nodes
}

/// The conjunction reading of a separator character.
fn and_conj(surface: &str) -> Rc<Node> {
  Rc::new(Node::lexical(surface, "punct", 100, Cat::Conj))
}

/// The empty-case-marker reading of a separator: turns the bunsetsu to
/// its left into a caseless argument of whatever sentence follows.
fn empty_cm(surface: &str) -> Rc<Node> {
  use FeatureValue::{Ga, Nc, O};
  let t = Cat::var(true, 1, modifiable_s());
  let cat = Cat::bslash(
    Cat::slash(t.clone(), Cat::bslash(t, Cat::NP(vec![Feature::Plain(vec![Ga, O])]))),
    Cat::NP(vec![Feature::Plain(vec![Nc])]),
  );
  Rc::new(Node::lexical(surface, "punct", 99, cat))
}

struct ParseState<'a> {
  lexicon: &'a Lexicon,
  beam: usize,
  chart: Chart,
  /// Processed chars, oldest first; the box sweep walks it backwards.
  stack: Vec<char>,
  /// Boundary positions: start of text, then one past each separator.
  /// Brackets push and pop here too. The last entry bounds how far left
  /// the lexical substring may extend; rule combination is not bounded.
  seps: Vec<usize>,
}

impl<'a> ParseState<'a> {
  fn new(lexicon: &'a Lexicon, beam: usize) -> Self {
    Self {
      lexicon,
      beam,
      chart: Chart::new(),
      stack: Vec::new(),
      seps: vec![0],
    }
  }

  /// Consumes the pivot character, filling every cell that ends at
  /// `pivot + 1`.
  fn step(&mut self, pivot: usize, c: char) {
    if is_separator(c) {
      self.separator(pivot, c);
    } else {
      if c == '『' {
        self.seps.push(pivot);
      } else if c == '』' && self.seps.len() > 1 {
        self.seps.pop();
      }
      self.stack.push(c);
      self.sweep(pivot);
    }
    trace!(pivot, ?c, boundaries = ?self.seps, "pivot done");
  }

  /// A separator gets exactly two lexical readings, and every cell
  /// ending at it is carried across it, restricted to complete
  /// bunsetsu.
  fn separator(&mut self, pivot: usize, c: char) {
    let surface = c.to_string();
    let cell = vec![and_conj(&surface), empty_cm(&surface)];
    self.chart.set_cell((pivot, pivot + 1), prune(self.beam, cell));

    for start in 0..pivot {
      let carried: Vec<Rc<Node>> = self
        .chart
        .cell((start, pivot))
        .iter()
        .filter(|n| n.cat.is_bunsetsu())
        .cloned()
        .collect();
      if !carried.is_empty() {
        self.chart.set_cell((start, pivot + 1), prune(self.beam, carried));
      }
    }

    self.seps.push(pivot + 1);
    self.stack.push(c);
  }

  /// The leftward sweep: for every start position, assemble the span's
  /// candidates and prune. The substring lookup stops at the last
  /// boundary; the rules keep combining cells on both sides of it.
  fn sweep(&mut self, pivot: usize) {
    let end = pivot + 1;
    let boundary = self.seps.last().copied().unwrap_or(0);
    let mut word = String::new();
    for start in (0..end).rev() {
      word.insert(0, self.stack[start]);

      let mut acc = if end - start <= MAX_WORD_LEN && start >= boundary {
        self.lexicon.lookup(&word)
      } else {
        Vec::new()
      };

      self.check_binary(start, end, &mut acc);
      self.check_coordination(start, end, &mut acc);
      self.check_parenthesis(start, end, &mut acc);
      self.check_empty_categories(&mut acc);
      for i in 0..acc.len() {
        let node = acc[i].clone();
        unary_rules(&node, &mut acc);
      }

      trace!(start, end, candidates = acc.len(), "cell filled");
      self.chart.set_cell((start, end), prune(self.beam, acc));
    }
  }

  fn check_binary(&self, start: usize, end: usize, acc: &mut Vec<Rc<Node>>) {
    for split in start + 1..end {
      for left in self.chart.cell((start, split)) {
        for right in self.chart.cell((split, end)) {
          binary_rules(left, right, acc);
        }
      }
    }
  }

  /// Coordination over every conjunction position strictly inside the
  /// span.
  fn check_coordination(&self, start: usize, end: usize, acc: &mut Vec<Rc<Node>>) {
    for k in start + 1..end.saturating_sub(1) {
      for conj in self.chart.cell((k, k + 1)) {
        if conj.cat != Cat::Conj {
          continue;
        }
        for left in self.chart.cell((start, k)) {
          for right in self.chart.cell((k + 1, end)) {
            coordination(left, conj, right, acc);
          }
        }
      }
    }
  }

  fn check_parenthesis(&self, start: usize, end: usize, acc: &mut Vec<Rc<Node>>) {
    if start + 3 > end {
      return;
    }
    for left in self.chart.cell((start, start + 1)) {
      if left.cat != Cat::LParen {
        continue;
      }
      for right in self.chart.cell((end - 1, end)) {
        if right.cat != Cat::RParen {
          continue;
        }
        for center in self.chart.cell((start + 1, end - 1)) {
          parenthesis(left, center, right, acc);
        }
      }
    }
  }

  /// One pass, not iterated to a fixpoint: each empty category is tried
  /// on both sides of every candidate accumulated so far.
  fn check_empty_categories(&self, acc: &mut Vec<Rc<Node>>) {
    for ec in &self.lexicon.empty_categories {
      let snapshot: Vec<Rc<Node>> = acc.clone();
      for node in &snapshot {
        binary_rules(ec, node, acc);
        binary_rules(node, ec, acc);
      }
    }
  }
}

impl Lexicon {
  /// Parses a sentence into a chart, keeping at most `beam` candidates
  /// per span.
  pub fn parse(&self, beam: usize, sentence: &str) -> Chart {
    let purified = purify_text(sentence);
    debug!(sentence, purified = %purified, beam, "parsing");
    let narrowed = self.filtered_for(&purified);

    let mut state = ParseState::new(&narrowed, beam);
    for (pivot, c) in purified.chars().enumerate() {
      state.step(pivot, c);
    }
    state.chart
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lexicon::construct_predicate;
  use crate::node::RuleSymbol;
  use FeatureValue::{Ga, Nc, Term, V5k, V5r};

  fn np(vs: Vec<FeatureValue>) -> Cat {
    Cat::NP(vec![Feature::Plain(vs)])
  }

  fn demo_lexicon() -> Lexicon {
    Lexicon::new(
      vec![
        Rc::new(Node::lexical(
          "美味しい",
          "demo",
          98,
          Cat::slash(np(vec![Nc]), np(vec![Nc])),
        )),
        Rc::new(Node::lexical("パン", "demo", 97, np(vec![Nc]))),
        Rc::new(Node::lexical("僕が", "demo", 97, np(vec![Ga]))),
        Rc::new(Node::lexical(
          "行く",
          "demo",
          96,
          construct_predicate(vec![V5k], vec![Term]),
        )),
        Rc::new(Node::lexical(
          "走る",
          "demo",
          95,
          construct_predicate(vec![V5r], vec![Term]),
        )),
      ],
      vec![],
    )
  }

  #[test]
  fn test_purify_text() {
    assert_eq!(purify_text("美味しい パン！"), "美味しいパン");
    assert_eq!(purify_text("a,b，c―d"), "a、b、c、d");
    // idempotent
    let once = purify_text("僕が 行く。そして，走る！");
    assert_eq!(purify_text(&once), once);
    assert_eq!(once, "僕が行く。そして、走る");
  }

  #[test]
  fn test_modifier_application_fills_full_span() {
    let chart = demo_lexicon().parse(10, "美味しいパン");

    assert_eq!(chart.cell((0, 4)).len(), 1);
    assert_eq!(chart.cell((4, 6)).len(), 1);

    let full = chart.cell((0, 6));
    assert_eq!(full.len(), 1);
    assert_eq!(full[0].rule, RuleSymbol::Ffa);
    assert_eq!(full[0].cat, np(vec![Nc]));
    assert!((full[0].score - 0.9506).abs() < 1e-9);
  }

  #[test]
  fn test_subject_predicate() {
    let chart = demo_lexicon().parse(10, "僕が行く");
    let full = chart.cell((0, 4));
    assert_eq!(full.len(), 1);
    assert_eq!(full[0].rule, RuleSymbol::Bfa);
    assert!((full[0].score - 0.9312).abs() < 1e-9);
  }

  #[test]
  fn test_beam_bound_and_order() {
    let beam = 2;
    let chart = demo_lexicon().parse(beam, "美味しいパンパン");
    for (_, cell) in chart.iter() {
      assert!(cell.len() <= beam);
      for pair in cell.windows(2) {
        assert!(pair[0].score >= pair[1].score);
      }
    }
  }

  #[test]
  fn test_separator_readings_and_carry() {
    let chart = demo_lexicon().parse(10, "走る、");

    let sep = chart.cell((2, 3));
    assert_eq!(sep.len(), 2);
    assert_eq!(sep[0].cat, Cat::Conj);
    assert!((sep[0].score - 1.0).abs() < 1e-12);
    assert!((sep[1].score - 0.99).abs() < 1e-12);

    // the predicate is a complete bunsetsu, so it is carried across
    let carried = chart.cell((0, 3));
    assert_eq!(carried.len(), 1);
    assert_eq!(carried[0].surface, "走る");
    assert_eq!(
      carried[0].cat,
      construct_predicate(vec![V5r], vec![Term])
    );
  }

  #[test]
  fn test_combination_crosses_separator() {
    // the lexical substring stops at the boundary, but cells on both
    // sides of it still combine through the rules
    let chart = demo_lexicon().parse(10, "僕が、行く");

    assert_eq!(chart.cell((0, 2)).len(), 1);
    // NPga is carried across the separator
    assert_eq!(chart.cell((0, 3)).len(), 1);
    assert_eq!(chart.cell((3, 5)).len(), 1);

    let full = chart.cell((0, 5));
    assert_eq!(full.len(), 1);
    assert_eq!(full[0].rule, RuleSymbol::Bfa);
    assert!((full[0].score - 0.9312).abs() < 1e-9);
  }

  #[test]
  fn test_empty_category_insertion() {
    let lexicon = Lexicon::new(
      vec![Rc::new(Node::lexical("パン", "demo", 97, np(vec![Nc])))],
      vec![Rc::new(Node::empty_category(
        "ec",
        98,
        Cat::bslash(np(vec![Ga]), np(vec![Nc])),
      ))],
    );
    let chart = lexicon.parse(10, "パン");

    let cell = chart.cell((0, 2));
    assert_eq!(cell.len(), 2);
    assert_eq!(cell[0].rule, RuleSymbol::Lex);
    assert_eq!(cell[1].rule, RuleSymbol::Bfa);
    assert_eq!(cell[1].cat, np(vec![Ga]));
    assert!((cell[1].score - 0.97 * 0.98).abs() < 1e-9);
  }

  #[test]
  fn test_unknown_input_yields_empty_chart() {
    let chart = demo_lexicon().parse(10, "知らない");
    assert!(chart.is_empty());
  }
}
