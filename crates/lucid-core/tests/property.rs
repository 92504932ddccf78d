use std::panic;

use lucid_core::{Format, JsonTree, JsonValue, RenderNode, parse_blocks, parse_json, render, render_json};

const CASES: usize = 200;
const MAX_LEN: usize = 512;
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 \
\n\t#>*`_[](){}<>:,.-=\"'";
const WORDS: &[&str] = &["alpha", "beta", "Gamma", "delta", "epsilon", "zeta", "eta"];

#[test]
fn renderers_never_panic_on_random_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x5e1f_a3c0_77d2_9b41);
    for case in 0..CASES {
        let len = rng.gen_range(0, MAX_LEN + 1);
        let source = random_string(&mut rng, len);
        for format in [Format::Markdown, Format::Html, Format::Json, Format::Plain] {
            let result = panic::catch_unwind(|| render(&source, format));
            if result.is_err() {
                return Err(format!("{} render panicked for case {}: {:?}", format, case, source).into());
            }
        }
    }
    Ok(())
}

#[test]
fn marker_free_lines_become_one_paragraph_each() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x0c4e_91aa_d0b3_2f17);
    for case in 0..CASES {
        let line_count = rng.gen_range(0, 12);
        let mut lines = Vec::new();
        for _ in 0..line_count {
            if rng.gen_range(0, 4) == 0 {
                lines.push(String::new());
                continue;
            }
            let words = rng.gen_range(1, 6);
            let line: Vec<&str> = (0..words)
                .map(|_| WORDS[rng.gen_range(0, WORDS.len())])
                .collect();
            lines.push(line.join(" "));
        }
        let non_blank = lines.iter().filter(|line| !line.trim().is_empty()).count();
        let nodes = parse_blocks(&lines.join("\n"));
        let paragraphs = nodes
            .iter()
            .filter(|node| matches!(node, RenderNode::Paragraph { .. }))
            .count();
        if paragraphs != non_blank || nodes.len() != non_blank {
            return Err(format!(
                "case {}: expected {} paragraphs, got {:?}",
                case, non_blank, nodes
            )
            .into());
        }
    }
    Ok(())
}

#[test]
fn plain_output_has_one_node_per_line() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x7781_3b5e_2c09_d4af);
    for case in 0..CASES {
        let len = rng.gen_range(0, MAX_LEN + 1);
        let source = random_string(&mut rng, len);
        let nodes = render(&source, Format::Plain);
        if nodes.len() != source.lines().count() {
            return Err(format!("case {}: line count mismatch for {:?}", case, source).into());
        }
    }
    Ok(())
}

#[test]
fn valid_json_never_falls_back_and_keeps_key_order() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x2d6b_f0e4_8a13_c597);
    for case in 0..CASES {
        let keys = random_keys(&mut rng);
        let body: Vec<String> = keys
            .iter()
            .map(|key| format!("\"{}\": {}", key, random_json_value(&mut rng, 2)))
            .collect();
        let source = format!("{{{}}}", body.join(", "));

        let node = render_json(&source);
        let tree = match node {
            RenderNode::Json { tree } => tree,
            other => {
                return Err(format!("case {}: fell back on {:?}: {:?}", case, source, other).into());
            }
        };
        let actual: Vec<String> = match tree {
            JsonTree::Object { entries, .. } => entries.into_iter().map(|entry| entry.key).collect(),
            JsonTree::EmptyObject => Vec::new(),
            other => return Err(format!("case {}: expected object, got {:?}", case, other).into()),
        };
        if actual != keys {
            return Err(format!("case {}: key order {:?} != {:?}", case, actual, keys).into());
        }

        let JsonValue::Object(entries) = parse_json(&source)? else {
            return Err(format!("case {}: expected object value", case).into());
        };
        if entries.len() != keys.len() {
            return Err(format!("case {}: entry count mismatch", case).into());
        }
    }
    Ok(())
}

fn random_keys(rng: &mut Lcg) -> Vec<String> {
    let count = rng.gen_range(0, 8);
    let mut keys: Vec<String> = Vec::new();
    while keys.len() < count {
        let key = format!("{}{}", WORDS[rng.gen_range(0, WORDS.len())], rng.gen_range(0, 100));
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

fn random_json_value(rng: &mut Lcg, depth: usize) -> String {
    let choice = if depth == 0 {
        rng.gen_range(0, 4)
    } else {
        rng.gen_range(0, 6)
    };
    match choice {
        0 => "null".to_string(),
        1 => {
            let flag = rng.gen_range(0, 2) == 0;
            flag.to_string()
        }
        2 => format!("{}.{}", rng.gen_range(0, 1000), rng.gen_range(0, 100)),
        3 => format!("\"{}\"", WORDS[rng.gen_range(0, WORDS.len())]),
        4 => {
            let len = rng.gen_range(0, 8);
            let items: Vec<String> = (0..len).map(|_| random_json_value(rng, depth - 1)).collect();
            format!("[{}]", items.join(","))
        }
        _ => {
            let keys = random_keys(rng);
            let body: Vec<String> = keys
                .iter()
                .map(|key| format!("\"{}\":{}", key, random_json_value(rng, depth - 1)))
                .collect();
            format!("{{{}}}", body.join(","))
        }
    }
}

fn random_string(rng: &mut Lcg, len: usize) -> String {
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        let idx = rng.gen_range(0, CHARSET.len());
        let byte = CHARSET.get(idx).copied().unwrap_or(b' ');
        out.push(byte as char);
    }
    out
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn gen_range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        let span = max - min;
        let value = (self.next() >> 1) as usize;
        min + (value % span)
    }
}
