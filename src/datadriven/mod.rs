//! Script-driven tests.
//!
//! A script is a sequence of blocks separated by blank lines:
//!
//! ```text
//! # comment
//! insert keys=(3,6,7)
//! ----
//! 3: true
//! 6: true
//! 7: true
//! ```
//!
//! The first line is the directive: a command followed by `key`,
//! `key=value` or `key=(v1, v2)` arguments. Lines up to `----` are the
//! block's input and lines after it are the expected output.

use std::{fs, io, path::Path, result};

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error")]
    IOError {
        #[from]
        source: io::Error,
    },
}

pub type Result<T> = result::Result<T, ScriptError>;

#[derive(Default)]
pub struct TestData {
    pub pos: String,
    pub cmd: String,
    pub cmd_args: Vec<CmdArg>,
    pub input: String,
    pub expected: String,
}

pub struct CmdArg {
    key: String,
    vals: Vec<String>,
}

impl CmdArg {
    pub fn len(&self) -> usize {
        self.vals.len()
    }
    pub fn string(&self, idx: usize) -> String {
        self.vals[idx].clone()
    }
    pub fn int64(&self, idx: usize) -> i64 {
        self.vals[idx].parse().unwrap()
    }
    pub fn uint64(&self, idx: usize) -> u64 {
        self.vals[idx].parse().unwrap()
    }
}

impl TestData {
    pub fn find_arg(&self, key: &str) -> Option<&CmdArg> {
        self.cmd_args.iter().find(|&f| f.key == key)
    }
    pub fn scan_args(&self, key: &str) -> &CmdArg {
        if let Some(arg) = self.find_arg(key) {
            arg
        } else {
            panic!("{}: missing args: {}", self.pos, key);
        }
    }
    pub fn has_arg(&self, key: &str) -> bool {
        self.find_arg(key).is_some()
    }
}

pub fn run_test<F: FnMut(&TestData) -> String>(path: impl AsRef<Path>, f: F) -> Result<()> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    run_test_from_source(&content, &path.display().to_string(), f)
}

pub fn run_test_from_string<F: FnMut(&TestData) -> String>(input: impl AsRef<str>, f: F) -> Result<()> {
    run_test_from_source(input.as_ref(), "", f)
}

fn run_test_from_source<F: FnMut(&TestData) -> String>(input: &str, source: &str, mut f: F) -> Result<()> {
    let datas = parse_test_data(input, source)?;
    for data in datas.iter() {
        let actual = normalize(&f(data));
        assert_eq!(actual, data.expected, "{}: {}", data.pos, data.cmd);
    }
    Ok(())
}

fn normalize(s: &str) -> String {
    s.lines().map(|line| format!("{}\n", line.trim_end())).collect()
}

pub fn parse_test_data(input: &str, source: &str) -> Result<Vec<TestData>> {
    let pattern = Regex::new(PATTERN).map_err(|e| ScriptError::Parse(e.to_string()))?;
    let mut datas = Vec::new();

    let mut iter = input.lines().enumerate().peekable();
    while let Some((line_no, line)) = iter.next() {
        if line.trim().starts_with('#') {
            continue;
        }
        let fields = split_directive(&pattern, line)?;
        if fields.is_empty() {
            continue;
        }

        let mut data = TestData {
            pos: format!("{}:{}", source, line_no + 1),
            cmd: fields[0].clone(),
            ..Default::default()
        };
        for arg in &fields[1..] {
            data.cmd_args.push(parse_arg(arg));
        }

        let mut buf = String::new();
        let mut separator = false;
        while let Some((_, line)) = iter.next_if(|(_, l)| !l.trim().is_empty()) {
            if line == "----" {
                separator = true;
                break;
            }
            buf.push_str(line);
            buf.push('\n');
        }
        data.input = buf.trim().to_owned();

        if separator {
            let mut buf = String::new();
            while let Some((_, line)) = iter.next_if(|(_, l)| !l.trim().is_empty()) {
                buf.push_str(line.trim_end());
                buf.push('\n');
            }
            data.expected = buf;
        }
        datas.push(data);
    }

    Ok(datas)
}

fn parse_arg(arg: &str) -> CmdArg {
    match arg.find('=') {
        Some(idx) => {
            let key = arg[0..idx].to_owned();
            let val = &arg[idx + 1..];
            let vals = if val.len() > 2 && val.starts_with('(') && val.ends_with(')') {
                val[1..val.len() - 1]
                    .split(',')
                    .map(|s| s.trim().to_owned())
                    .collect()
            } else {
                vec![val.to_owned()]
            };
            CmdArg { key, vals }
        }
        None => CmdArg {
            key: arg.to_owned(),
            vals: Vec::new(),
        },
    }
}

const PATTERN: &str = r"^ *[a-zA-Z0-9_/,-\.]+(|=[-a-zA-Z0-9_@]+|=\([^)]*\))( |$)";

fn split_directive(pattern: &Regex, mut line: &str) -> Result<Vec<String>> {
    let mut results = Vec::new();
    while !line.trim().is_empty() {
        let m = pattern
            .find(line)
            .ok_or_else(|| ScriptError::Parse(format!("cannot parse directive: {}", line)))?;
        line = &line[m.end()..];
        results.push(m.as_str().trim().to_string());
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_directive() {
        let pattern = Regex::new(PATTERN).unwrap();
        let input = "make argTuple=(1, 🍌) argInt=12 argString=greedily argString=totally_ignored";
        let cmds = split_directive(&pattern, input).unwrap();
        assert_eq!(cmds.len(), 5);
        assert_eq!(cmds[0], "make");
        assert_eq!(cmds.last().unwrap(), "argString=totally_ignored");

        assert!(matches!(
            split_directive(&pattern, "insert keys=(1,2"),
            Err(ScriptError::Parse(_))
        ));
    }

    #[test]
    fn test_from_string() {
        let input = r"
# NB: we allow duplicate args. ScanArgs simply picks the first occurrence.
make argTuple=(1, 🍌) argInt=12 argString=greedily argString=totally_ignored
sentence
----
Did the following: make sentence
1 hungry monkey eats a 🍌
while 12 other monkeys watch greedily

flag reject
----
";
        let mut seen = 0;
        run_test_from_string(input, |t| {
            seen += 1;
            match t.cmd.as_str() {
                "make" => {
                    assert_eq!(t.input, "sentence");
                    assert_eq!(t.cmd_args.len(), 4);
                    let arg_str = t.scan_args("argString");
                    assert_eq!(arg_str.string(0), "greedily");
                    let arg_int = t.scan_args("argInt");
                    assert_eq!(arg_int.int64(0), 12);
                    let arg_tuple = t.scan_args("argTuple");
                    assert_eq!(arg_tuple.len(), 2);
                    assert_eq!(arg_tuple.int64(0), 1);
                    format!(
                        "Did the following: {} {}\n{} hungry monkey eats a {}\nwhile {} other monkeys watch {}\n",
                        t.cmd,
                        t.input,
                        arg_tuple.int64(0),
                        arg_tuple.string(1),
                        arg_int.int64(0),
                        arg_str.string(0)
                    )
                }
                _ => {
                    assert!(t.has_arg("reject"));
                    assert_eq!(t.scan_args("reject").len(), 0);
                    String::new()
                }
            }
        })
        .unwrap();
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_missing_file() {
        let res = run_test("/nonexistent/rskiplist/script", |_| String::new());
        assert!(matches!(res, Err(ScriptError::IOError { .. })));
    }
}
