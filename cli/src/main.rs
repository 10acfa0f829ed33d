use std::env;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::process;
use std::rc::Rc;

use bunkai::lexicon::construct_predicate;
use bunkai::{extract_parse_result, Cat, Err, Feature, FeatureValue, Lexicon, Node, ParseResult};

fn usage(prog_name: &str) -> String {
  format!(
    r"Usage: {} [options]

Reads one sentence per line from stdin and parses it with the built-in
demo lexicon.

Options:
  -h, --help     Print this message
  -c, --chart    Print the parse chart (defaults to not printing)
  -b, --beam N   Beam width per chart cell (defaults to 24)",
    prog_name
  )
}

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

fn parse(lexicon: &Lexicon, sentence: &str, beam: usize, print_chart: bool) -> Result<(), Err> {
  let chart = lexicon.parse(beam, sentence);

  if print_chart {
    println!("chart:\n{}", chart);
  }

  match extract_parse_result(beam, &chart) {
    ParseResult::Full(nodes) => {
      println!("Full parse, {} reading(s)", nodes.len());
      for node in nodes {
        println!("{}", node);
      }
    }
    ParseResult::Partial(nodes) => {
      println!("Partial parse, {} reading(s)", nodes.len());
      for node in nodes {
        println!("{}", node);
      }
    }
    ParseResult::Failed => println!("No parse"),
  }
  println!();

  Ok(())
}

struct Args {
  print_chart: bool,
  beam: usize,
}

impl Args {
  fn make_error_message(msg: &str, prog_name: impl AsRef<str>) -> String {
    format!("argument error: {}.\n\n{}", msg, usage(prog_name.as_ref()))
  }

  fn parse(v: Vec<String>) -> Result<Self, String> {
    let prog_name = &v[0];
    let mut print_chart = false;
    let mut beam = 24;

    let mut iter = v.iter().skip(1);
    while let Some(arg) = iter.next() {
      match arg.as_str() {
        "-h" | "--help" => {
          println!("{}", usage(prog_name));
          process::exit(0);
        }
        "-c" | "--chart" => print_chart = true,
        "-b" | "--beam" => {
          let n = iter
            .next()
            .ok_or_else(|| Self::make_error_message("--beam needs a value", prog_name))?;
          beam = n
            .parse()
            .map_err(|_| Self::make_error_message("--beam needs a number", prog_name))?;
        }
        other => {
          return Err(Self::make_error_message(
            &format!("unknown option {}", other),
            prog_name,
          ));
        }
      }
    }

    Ok(Self { print_chart, beam })
  }
}

fn main() -> Result<(), Err> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  let args = match Args::parse(env::args().collect()) {
    Ok(args) => args,
    Err(msg) => {
      eprintln!("{}", msg);
      process::exit(1);
    }
  };

  let lexicon = demo_lexicon();
  let stdin = io::stdin();

  print!("> ");
  io::stdout().flush()?;
  for line in stdin.lock().lines() {
    let line = line?;
    let sentence = line.trim();
    if !sentence.is_empty() {
      parse(&lexicon, sentence, args.beam, args.print_chart)?;
    }
    print!("> ");
    io::stdout().flush()?;
  }

  Ok(())
}
