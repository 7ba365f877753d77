// MJ-Score Rule Graphs
// Loader for the block-structured scoring-graph description format

use rustc_hash::FxHashMap;

use crate::decompose::{
    Mask, ALL_MASK, CHOW_MASK, CONNECTED_MASK, KONG_MASK, PAIR_MASK, PUNG_MASK, SET_MASK,
    SINGLES_MASK,
};
use crate::tiles;
use crate::types::Tile;

/// Which facings of a grouping record an edge condition accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingCond {
    Either,
    Open,
    Concealed,
}

/// Tile face class an edge condition can require of a record's anchor tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceCond {
    Any,
    Simple,
    Terminal,
    Numeral,
    /// Face rank one through nine (1-based)
    Rank(u8),
    Wind,
    /// A specific wind or dragon tile
    Exact(Tile),
    RoundWind,
    OwnWind,
    Dragon,
    Honour,
    Flower,
    Season,
}

/// Suit family an edge condition can require of a record's anchor tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuitCond {
    Any,
    Bamboo,
    Characters,
    Dots,
    Honours,
    Bonus,
}

/// Requirements a grouping record must meet to traverse an edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCond {
    /// Accepted grouping kinds, as a kind bitmask (blanket words like
    /// `triplet` and `set` expand to several bits at load time)
    pub kinds: Mask,
    pub facing: FacingCond,
    pub face: FaceCond,
    pub suit: SuitCond,
    /// Exact member tiles; empty means unrestricted
    pub tiles: Vec<Tile>,
}

/// One edge condition: either "record list exhausted" or a grouping match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Empty,
    Group(GroupCond),
}

/// A conditional edge between two graph nodes
#[derive(Debug, Clone)]
pub struct Edge {
    pub condition: Condition,
    pub target: usize,
    pub value: i32,
    pub concealed_value: i32,
    /// Human-readable condition text for ledger lines, e.g. `pung/dragon`
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct RuleNode {
    pub name: String,
    pub edges: Vec<Edge>,
    /// The implicit terminal node; reaching it accepts regardless of
    /// remaining records
    pub accepting: bool,
}

/// One named scoring graph with its accept payoff
#[derive(Debug, Clone)]
pub struct RuleGraph {
    pub name: String,
    pub value: i32,
    pub nodes: Vec<RuleNode>,
    pub start: usize,
}

/// Result of loading one graph description text: the usable graphs plus
/// the diagnostics for everything that had to be dropped
#[derive(Debug, Default)]
pub struct LoadReport {
    pub graphs: Vec<RuleGraph>,
    pub warnings: Vec<String>,
}

impl LoadReport {
    /// Find a loaded graph by name
    pub fn graph(&self, name: &str) -> Option<&RuleGraph> {
        self.graphs.iter().find(|g| g.name == name)
    }
}

/// Parse one conditional description, e.g. `pung dragon` or
/// `chow simple bamboo` or `pair any any 27,27`
pub fn parse_condition(text: &str) -> Result<Condition, String> {
    let mut words = text.split_whitespace();
    let set = words.next().ok_or_else(|| "empty conditional".to_string())?;

    if set == "empty" {
        return Ok(Condition::Empty);
    }

    let (kinds, facing) = parse_set_word(set)?;
    let mut cond = GroupCond {
        kinds,
        facing,
        face: FaceCond::Any,
        suit: SuitCond::Any,
        tiles: Vec::new(),
    };

    // the face, suit and tile-list segments are all optional, and the exact
    // tile list may follow any of them
    for word in words {
        if word.contains(',') || word.chars().all(|c| c.is_ascii_digit()) {
            cond.tiles = parse_tile_list(word)?;
            continue;
        }
        if cond.face == FaceCond::Any && cond.suit == SuitCond::Any {
            if let Some(face) = parse_face_word(word) {
                cond.face = face;
                continue;
            }
        }
        if cond.suit == SuitCond::Any {
            if let Some(suit) = parse_suit_word(word) {
                cond.suit = suit;
                continue;
            }
        }
        return Err(format!("unparsable conditional token '{}'", word));
    }

    Ok(Condition::Group(cond))
}

fn parse_set_word(word: &str) -> Result<(Mask, FacingCond), String> {
    let (bare, facing) = match word {
        "open" => return Ok((ALL_MASK, FacingCond::Open)),
        "concealed" => return Ok((ALL_MASK, FacingCond::Concealed)),
        _ => match word.strip_prefix("concealed_") {
            Some(rest) => (rest, FacingCond::Concealed),
            None => (word, FacingCond::Either),
        },
    };
    let kinds = match bare {
        "any" => ALL_MASK,
        "single" => SINGLES_MASK,
        "connectedpair" => CONNECTED_MASK,
        "pair" => PAIR_MASK,
        "chow" => CHOW_MASK,
        "pung" => PUNG_MASK,
        "kong" => KONG_MASK,
        "triplet" => PUNG_MASK | KONG_MASK,
        "set" => SET_MASK,
        _ => return Err(format!("unknown grouping word '{}'", word)),
    };
    Ok((kinds, facing))
}

fn parse_face_word(word: &str) -> Option<FaceCond> {
    let face = match word {
        "any" => FaceCond::Any,
        "simple" => FaceCond::Simple,
        "terminal" => FaceCond::Terminal,
        "numeral" => FaceCond::Numeral,
        "one" => FaceCond::Rank(1),
        "two" => FaceCond::Rank(2),
        "three" => FaceCond::Rank(3),
        "four" => FaceCond::Rank(4),
        "five" => FaceCond::Rank(5),
        "six" => FaceCond::Rank(6),
        "seven" => FaceCond::Rank(7),
        "eight" => FaceCond::Rank(8),
        "nine" => FaceCond::Rank(9),
        "wind" => FaceCond::Wind,
        "east" => FaceCond::Exact(tiles::EAST),
        "south" => FaceCond::Exact(tiles::SOUTH),
        "west" => FaceCond::Exact(tiles::WEST),
        "north" => FaceCond::Exact(tiles::NORTH),
        "roundwind" => FaceCond::RoundWind,
        "ownwind" => FaceCond::OwnWind,
        "dragon" => FaceCond::Dragon,
        "red" => FaceCond::Exact(tiles::RED),
        "green" => FaceCond::Exact(tiles::GREEN),
        "white" => FaceCond::Exact(tiles::WHITE),
        "honour" => FaceCond::Honour,
        "flower" => FaceCond::Flower,
        "season" => FaceCond::Season,
        _ => return None,
    };
    Some(face)
}

fn parse_suit_word(word: &str) -> Option<SuitCond> {
    let suit = match word {
        "any" => SuitCond::Any,
        "bamboo" => SuitCond::Bamboo,
        "characters" => SuitCond::Characters,
        "dots" => SuitCond::Dots,
        "honours" => SuitCond::Honours,
        "bonus" => SuitCond::Bonus,
        _ => return None,
    };
    Some(suit)
}

fn parse_tile_list(word: &str) -> Result<Vec<Tile>, String> {
    word.split(',')
        .map(|t| {
            t.parse::<usize>()
                .map_err(|_| format!("bad tile id '{}'", t))
                .and_then(|id| tiles::check(id).map_err(|e| e.to_string()))
        })
        .collect()
}

// unresolved edge, carrying the target node's name until hook-up
struct PendingEdge {
    condition: Condition,
    target: String,
    value: i32,
    concealed_value: i32,
    label: String,
}

struct PendingNode {
    name: String,
    edges: Vec<PendingEdge>,
}

enum Block {
    None,
    Dfsa,
    Node,
    Path,
}

/// Load every graph described in `text`. `limit` substitutes the literal
/// `value=limit` in graph headers. Recoverable problems (bad conditional,
/// unresolvable edge target, missing start node) drop the offending edge or
/// graph and land as warnings on the report.
pub fn load_graphs(text: &str, limit: i32) -> LoadReport {
    let mut report = LoadReport::default();

    let mut block = Block::None;
    let mut graph_name = String::new();
    let mut graph_value = 0i32;
    let mut nodes: Vec<PendingNode> = Vec::new();
    let mut node_name = String::new();
    let mut edges: Vec<PendingEdge> = Vec::new();
    let mut condition: Option<Condition> = None;
    let mut cond_label = String::new();
    let mut value = 0i32;
    let mut concealed_value = 0i32;
    let mut lnode = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line {
            "[dfsa]" => {
                block = Block::Dfsa;
                graph_name.clear();
                graph_value = 0;
                nodes.clear();
            }
            "[node]" => {
                block = Block::Node;
                node_name.clear();
                edges.clear();
            }
            "[path]" => {
                block = Block::Path;
                condition = None;
                cond_label.clear();
                value = 0;
                concealed_value = 0;
                lnode.clear();
            }
            "[/path]" => {
                if let Some(cond) = condition.take() {
                    // a positive open value doubles for concealed groupings
                    // unless the description says otherwise
                    if value > 0 && concealed_value == 0 {
                        concealed_value = 2 * value;
                    }
                    edges.push(PendingEdge {
                        condition: cond,
                        target: std::mem::take(&mut lnode),
                        value,
                        concealed_value,
                        label: std::mem::take(&mut cond_label),
                    });
                }
                block = Block::Node;
            }
            "[/node]" => {
                nodes.push(PendingNode {
                    name: std::mem::take(&mut node_name),
                    edges: std::mem::take(&mut edges),
                });
                block = Block::Dfsa;
            }
            "[/dfsa]" => {
                if let Some(graph) = hook_up(
                    std::mem::take(&mut graph_name),
                    graph_value,
                    std::mem::take(&mut nodes),
                    &mut report.warnings,
                ) {
                    report.graphs.push(graph);
                }
                block = Block::None;
            }
            _ => {
                let Some((key, val)) = line.split_once('=') else {
                    continue;
                };
                match (&block, key) {
                    (Block::Dfsa, "name") => graph_name = val.to_string(),
                    (Block::Dfsa, "value") => {
                        graph_value = if val == "limit" {
                            limit
                        } else {
                            val.parse().unwrap_or_else(|_| {
                                report
                                    .warnings
                                    .push(format!("bad value '{}' in graph header", val));
                                0
                            })
                        };
                    }
                    (Block::Node, "name") => node_name = val.to_string(),
                    (Block::Path, "conditional") => match parse_condition(val) {
                        Ok(cond) => {
                            condition = Some(cond);
                            cond_label = val.split_whitespace().collect::<Vec<_>>().join("/");
                        }
                        Err(err) => {
                            report.warnings.push(format!(
                                "dropped path '{}' in node '{}': {}",
                                val, node_name, err
                            ));
                            condition = None;
                        }
                    },
                    (Block::Path, "value") => value = val.parse().unwrap_or(0),
                    (Block::Path, "concealedvalue") => {
                        concealed_value = val.parse().unwrap_or(0)
                    }
                    (Block::Path, "lnode") => lnode = val.to_string(),
                    _ => {}
                }
            }
        }
    }

    report
}

/// Resolve edge target names to node indices and locate the start node.
/// The implicit accepting node is appended to every graph.
fn hook_up(
    name: String,
    value: i32,
    pending: Vec<PendingNode>,
    warnings: &mut Vec<String>,
) -> Option<RuleGraph> {
    let mut nodes: Vec<RuleNode> = pending
        .iter()
        .map(|n| RuleNode {
            name: n.name.clone(),
            edges: Vec::new(),
            accepting: false,
        })
        .collect();
    nodes.push(RuleNode {
        name: "accept".to_string(),
        edges: Vec::new(),
        accepting: true,
    });

    let mut index: FxHashMap<String, usize> = pending
        .iter()
        .enumerate()
        .map(|(i, n)| (n.name.clone(), i))
        .collect();
    index.insert("accept".to_string(), pending.len());

    for (i, node) in pending.into_iter().enumerate() {
        for edge in node.edges {
            match index.get(edge.target.as_str()) {
                Some(&target) => nodes[i].edges.push(Edge {
                    condition: edge.condition,
                    target,
                    value: edge.value,
                    concealed_value: edge.concealed_value,
                    label: edge.label,
                }),
                None => warnings.push(format!(
                    "graph '{}': edge from '{}' to unknown node '{}' dropped",
                    name, node.name, edge.target
                )),
            }
        }
    }

    match index.get("start") {
        Some(&start) => Some(RuleGraph {
            name,
            value,
            nodes,
            start,
        }),
        None => {
            warnings.push(format!("graph '{}' has no start node, dropped", name));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ Conditional parsing ============

    #[test]
    fn test_parse_bare_kind() {
        let cond = parse_condition("pung").unwrap();
        match cond {
            Condition::Group(c) => {
                assert_eq!(c.kinds, PUNG_MASK);
                assert_eq!(c.facing, FacingCond::Either);
                assert_eq!(c.face, FaceCond::Any);
                assert_eq!(c.suit, SuitCond::Any);
                assert!(c.tiles.is_empty());
            }
            Condition::Empty => panic!("expected group condition"),
        }
    }

    #[test]
    fn test_parse_blanket_words() {
        for (word, kinds) in [
            ("triplet", PUNG_MASK | KONG_MASK),
            ("set", SET_MASK),
            ("any", ALL_MASK),
        ] {
            match parse_condition(word).unwrap() {
                Condition::Group(c) => assert_eq!(c.kinds, kinds, "{}", word),
                Condition::Empty => panic!("expected group condition"),
            }
        }
    }

    #[test]
    fn test_parse_facing_words() {
        match parse_condition("concealed_pung").unwrap() {
            Condition::Group(c) => {
                assert_eq!(c.kinds, PUNG_MASK);
                assert_eq!(c.facing, FacingCond::Concealed);
            }
            Condition::Empty => panic!("expected group condition"),
        }
        match parse_condition("open").unwrap() {
            Condition::Group(c) => {
                assert_eq!(c.kinds, ALL_MASK);
                assert_eq!(c.facing, FacingCond::Open);
            }
            Condition::Empty => panic!("expected group condition"),
        }
    }

    #[test]
    fn test_parse_face_and_suit() {
        match parse_condition("chow simple bamboo").unwrap() {
            Condition::Group(c) => {
                assert_eq!(c.kinds, CHOW_MASK);
                assert_eq!(c.face, FaceCond::Simple);
                assert_eq!(c.suit, SuitCond::Bamboo);
            }
            Condition::Empty => panic!("expected group condition"),
        }
        match parse_condition("pair roundwind").unwrap() {
            Condition::Group(c) => assert_eq!(c.face, FaceCond::RoundWind),
            Condition::Empty => panic!("expected group condition"),
        }
    }

    #[test]
    fn test_parse_exact_tile_list() {
        match parse_condition("pair any any 27,27").unwrap() {
            Condition::Group(c) => assert_eq!(c.tiles, vec![27, 27]),
            Condition::Empty => panic!("expected group condition"),
        }
    }

    #[test]
    fn test_parse_empty_and_garbage() {
        assert_eq!(parse_condition("empty").unwrap(), Condition::Empty);
        assert!(parse_condition("frobnicate").is_err());
        assert!(parse_condition("pung sideways").is_err());
        assert!(parse_condition("pair any any 99").is_err());
    }

    // ============ Graph loading ============

    const SIMPLE_GRAPH: &str = "\
# a one-node graph
[dfsa]
name=all pungs
value=limit
[node]
name=start
[path]
conditional=pung
lnode=start
[/path]
[path]
conditional=empty
lnode=accept
[/path]
[/node]
[/dfsa]
";

    #[test]
    fn test_load_simple_graph() {
        let report = load_graphs(SIMPLE_GRAPH, 500);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.graphs.len(), 1);
        let graph = report.graph("all pungs").unwrap();
        assert_eq!(graph.value, 500);
        // declared node plus the implicit accepting node
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[graph.start].name, "start");
        assert_eq!(graph.nodes[graph.start].edges.len(), 2);
        assert!(graph.nodes[1].accepting);
    }

    #[test]
    fn test_unresolvable_target_drops_edge_not_graph() {
        let text = SIMPLE_GRAPH.replace("lnode=accept", "lnode=nowhere");
        let report = load_graphs(&text, 0);
        assert_eq!(report.graphs.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("nowhere"));
        assert_eq!(report.graphs[0].nodes[0].edges.len(), 1);
    }

    #[test]
    fn test_missing_start_drops_graph() {
        let text = SIMPLE_GRAPH.replace("name=start", "name=begin").replace("lnode=start", "lnode=begin");
        let report = load_graphs(&text, 0);
        assert!(report.graphs.is_empty());
        assert!(report.warnings.iter().any(|w| w.contains("no start node")));
    }

    #[test]
    fn test_bad_conditional_drops_path() {
        let text = SIMPLE_GRAPH.replace("conditional=pung", "conditional=zorp");
        let report = load_graphs(&text, 0);
        assert_eq!(report.graphs.len(), 1);
        assert!(report.warnings.iter().any(|w| w.contains("zorp")));
        assert_eq!(report.graphs[0].nodes[0].edges.len(), 1);
    }

    #[test]
    fn test_concealed_value_defaults_to_double() {
        let text = "\
[dfsa]
name=points
value=0
[node]
name=start
[path]
conditional=pung dragon
value=4
lnode=start
[/path]
[path]
conditional=kong
value=8
concealedvalue=24
lnode=start
[/path]
[/node]
[/dfsa]
";
        let report = load_graphs(text, 0);
        let graph = report.graph("points").unwrap();
        let edges = &graph.nodes[graph.start].edges;
        assert_eq!(edges[0].value, 4);
        assert_eq!(edges[0].concealed_value, 8);
        assert_eq!(edges[1].concealed_value, 24);
        assert_eq!(edges[0].label, "pung/dragon");
    }

    #[test]
    fn test_edges_resolve_across_named_nodes() {
        let text = "\
[dfsa]
name=two step
value=10
[node]
name=start
[path]
conditional=pair
lnode=tail
[/path]
[/node]
[node]
name=tail
[path]
conditional=empty
lnode=accept
[/path]
[/node]
[/dfsa]
";
        let report = load_graphs(text, 0);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        let graph = report.graph("two step").unwrap();
        assert_eq!(graph.nodes.len(), 3);
        let tail = graph.nodes[graph.start].edges[0].target;
        assert_eq!(graph.nodes[tail].name, "tail");
        let accept = graph.nodes[tail].edges[0].target;
        assert!(graph.nodes[accept].accepting);
    }

    #[test]
    fn test_multiple_graphs_in_one_text() {
        let doubled = format!("{}\n{}", SIMPLE_GRAPH, SIMPLE_GRAPH.replace("all pungs", "echo"));
        let report = load_graphs(&doubled, 100);
        assert_eq!(report.graphs.len(), 2);
        assert_eq!(report.graphs[1].name, "echo");
    }
}
