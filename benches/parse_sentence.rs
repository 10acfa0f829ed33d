use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bunkai::lexicon::construct_predicate;
use bunkai::{Cat, Feature, FeatureValue, Lexicon, Node};

fn np(v: FeatureValue) -> Cat {
  Cat::NP(vec![Feature::Plain(vec![v])])
}

fn demo_lexicon() -> Lexicon {
  use FeatureValue::{Ga, Nc, Term, V5k, V5r};
  Lexicon::new(
    vec![
      Rc::new(Node::lexical(
        "美味しい",
        "demo",
        98,
        Cat::slash(np(Nc), np(Nc)),
      )),
      Rc::new(Node::lexical("パン", "demo", 97, np(Nc))),
      Rc::new(Node::lexical("僕が", "demo", 97, np(Ga))),
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

fn parse(lexicon: &Lexicon, sentence: &str) -> usize {
  lexicon.simple_parse(24, sentence).len()
}

fn criterion_benchmark(c: &mut Criterion) {
  let lexicon = demo_lexicon();

  c.bench_function("parse short", |b| {
    b.iter(|| parse(black_box(&lexicon), black_box("僕が行く")))
  });

  c.bench_function("parse with separator", |b| {
    b.iter(|| {
      parse(
        black_box(&lexicon),
        black_box("美味しいパン、僕が走る。"),
      )
    })
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
