//! Result extraction: picking the best reading(s) out of a filled chart.

use std::cmp::Ordering;
use std::rc::Rc;

use tracing::debug;

use crate::cat::Cat;
use crate::chart::Chart;
use crate::lexicon::Lexicon;
use crate::node::Node;
use crate::rules::{conjoin_nodes, wrap_node};

/// The outcome of parsing one sentence. `Full` readings span the whole
/// input; `Partial` readings stitch the best fragments together.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
  Full(Vec<Rc<Node>>),
  Partial(Vec<Rc<Node>>),
  Failed,
}

/// Preference weight for ranking full readings, lower is better. Saturated
/// clauses beat bare sentences beat nominals; an unconsumed argument slot
/// costs one point per layer; punctuation categories never win.
fn ranking_weight(cat: &Cat) -> usize {
  match cat {
    Cat::Sbar(_) => 0,
    Cat::S(_) => 1,
    Cat::N => 2,
    Cat::NP(_) => 10,
    Cat::Conj | Cat::LParen | Cat::RParen => 100,
    Cat::Slash(result, _) | Cat::Bslash(result, _) => 1 + ranking_weight(result),
    Cat::T { restr, .. } => ranking_weight(restr),
  }
}

fn by_score_desc(a: &Rc<Node>, b: &Rc<Node>) -> Ordering {
  b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

/// Selects the best readings from a chart. The rightmost-ending spans are
/// preferred; of those, the leftmost-starting. A best span starting at the
/// beginning gives a full parse, otherwise the best fragments are each
/// wrapped like full readings and conjoined greedily to the left.
pub fn extract_parse_result(beam: usize, chart: &Chart) -> ParseResult {
  let mut spans: Vec<(usize, usize)> = chart
    .iter()
    .filter(|(_, nodes)| !nodes.is_empty())
    .map(|(span, _)| *span)
    .collect();
  spans.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

  let (start, end) = match spans.first() {
    Some(span) => *span,
    None => return ParseResult::Failed,
  };

  let mut best: Vec<Rc<Node>> = chart.cell((start, end)).to_vec();
  best.sort_by(|a, b| {
    ranking_weight(&a.cat)
      .cmp(&ranking_weight(&b.cat))
      .then_with(|| by_score_desc(a, b))
  });
  best.truncate(beam);
  let wrapped: Vec<Rc<Node>> = best.iter().map(wrap_node).collect();

  if start == 0 {
    debug!(end, readings = wrapped.len(), "full parse");
    return ParseResult::Full(wrapped);
  }

  // stitch wrapped fragments leftward, rightmost reachable first
  let mut heads = wrapped;
  let mut head_start = start;
  while head_start > 0 {
    let next = spans
      .iter()
      .find(|(_, fragment_end)| *fragment_end <= head_start);
    let (fs, fe) = match next {
      Some(span) => *span,
      None => break,
    };
    let mut conjoined = Vec::new();
    for left in chart.cell((fs, fe)) {
      let left = wrap_node(left);
      for right in &heads {
        conjoined.push(conjoin_nodes(&left, right));
      }
    }
    conjoined.sort_by(by_score_desc);
    conjoined.truncate(beam);
    heads = conjoined;
    head_start = fs;
  }
  debug!(head_start, end, readings = heads.len(), "partial parse");
  ParseResult::Partial(heads)
}

impl Lexicon {
  /// Parses and extracts in one call, losing the full/partial
  /// distinction. Failed parses come back empty.
  pub fn simple_parse(&self, beam: usize, sentence: &str) -> Vec<Rc<Node>> {
    let chart = self.parse(beam, sentence);
    match extract_parse_result(beam, &chart) {
      ParseResult::Full(nodes) | ParseResult::Partial(nodes) => nodes,
      ParseResult::Failed => Vec::new(),
    }
  }
}
