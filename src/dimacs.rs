use std::fs;

use log::warn;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, multispace0, not_line_ending, space1};
use nom::combinator::map_res;
use nom::multi::many0;
use nom::sequence::{delimited, preceded, separated_pair, terminated};

use crate::color::{Edge, Graph, Vertex};
use crate::error::{ColoringError, Result};


/// reads a DIMACS graph file. Vertices are named "1".."n".
pub fn read_from_file(filename:&str) -> Result<Graph> {
    read_from_str(&fs::read_to_string(filename)?)
}

/// parses a DIMACS graph (comments, `p edge n m` header, `e a b` lines)
pub fn read_from_str(content:&str) -> Result<Graph> {
    let s1 = content.replace("\r", "");
    let (s2,_) = preceded(multispace0, skip_comments)(s1.as_str()).map_err(parse_error)?;
    let (s3,(n,m)) = read_header(s2).map_err(parse_error)?;
    let (s4,edges) = many0(preceded(skip_comments, read_edge))(s3).map_err(parse_error)?;
    let (remaining,_) = skip_comments(s4).map_err(parse_error)?;
    if !remaining.trim().is_empty() {
        let line = remaining.lines().next().unwrap_or_default();
        return Err(ColoringError::Parse { message: format!("unexpected line: {}", line) });
    }
    if let Some((a,b)) = edges.iter().find(|(a,b)| *a == 0 || *b == 0 || *a > n || *b > n) {
        return Err(ColoringError::Parse {
            message: format!("edge ({},{}) out of range 1..{}", a, b, n)
        });
    }
    if edges.len() != m && 2*edges.len() != m {
        warn!("DIMACS header announces {} edges, {} read", m, edges.len());
    }
    let vertices = (1..=n).map(|i| Vertex::new(i.to_string())).collect();
    let edges = edges.iter().map(|(a,b)| Edge::new(a.to_string(), b.to_string())).collect();
    Ok(Graph::new(vertices, edges))
}

fn parse_error(e:nom::Err<nom::error::Error<&str>>) -> ColoringError {
    ColoringError::Parse { message: e.to_string() }
}

/// skips a single comment line (and the blank space after it)
fn skip_comment(s:&str) -> IResult<&str, &str> {
    terminated(preceded(tag("c"), not_line_ending), multispace0)(s)
}

/// skips all comments
pub fn skip_comments(s:&str) -> IResult<&str, Vec<&str>> {
    many0(skip_comment)(s)
}

/// reads a non-negative integer
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    separated_pair(read_integer, space1, read_integer)(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    delimited(alt((tag("p edge "), tag("p col "))), read_two_integers, multispace0)(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    delimited(tag("e "), read_two_integers, multispace0)(s)
}
