// MJ-Score Graph Matcher
// Interprets rule graphs against flattened grouping records

use crate::decompose::Mask;
use crate::pattern::GroupRecord;
use crate::ruleset::{Condition, Edge, FaceCond, FacingCond, GroupCond, RuleGraph, SuitCond};
use crate::tiles::{self, Suit};
use crate::types::{GroupKind, Ledger, Winds};

/// True when the graph accepts the record list: some path of matching edges
/// consumes records from the front until the accepting node is reached. The
/// accepting node accepts regardless of leftover records.
pub fn accept(graph: &RuleGraph, records: &[GroupRecord], winds: Winds) -> bool {
    node_accepts(graph, graph.start, records, winds)
}

/// Acceptance with payoff: the graph's own value on accept (with a ledger
/// line), zero on reject
pub fn accept_value(
    graph: &RuleGraph,
    records: &[GroupRecord],
    winds: Winds,
    ledger: &mut Ledger,
) -> i32 {
    if accept(graph, records, winds) {
        ledger.add(format!("{} for {}", graph.value, graph.name));
        graph.value
    } else {
        0
    }
}

/// Accumulative traversal: sum the edge values of every record the graph can
/// match, skipping records no edge wants. Never rejects; a hand matching
/// nothing scores zero.
pub fn accumulate(
    graph: &RuleGraph,
    records: &[GroupRecord],
    winds: Winds,
    ledger: &mut Ledger,
) -> i32 {
    node_value(graph, graph.start, records, 0, winds, ledger)
}

fn node_accepts(graph: &RuleGraph, node: usize, records: &[GroupRecord], winds: Winds) -> bool {
    let node = &graph.nodes[node];
    if node.accepting {
        return true;
    }
    node.edges.iter().any(|edge| match &edge.condition {
        Condition::Empty => {
            records.is_empty() && node_accepts(graph, edge.target, records, winds)
        }
        Condition::Group(cond) => match records.first() {
            Some(record) if cond_matches(cond, record, winds) => {
                node_accepts(graph, edge.target, &records[1..], winds)
            }
            _ => false,
        },
    })
}

fn node_value(
    graph: &RuleGraph,
    node_idx: usize,
    records: &[GroupRecord],
    value: i32,
    winds: Winds,
    ledger: &mut Ledger,
) -> i32 {
    let node = &graph.nodes[node_idx];
    if node.accepting || records.is_empty() {
        return value;
    }
    let record = &records[0];
    for edge in &node.edges {
        if let Condition::Group(cond) = &edge.condition {
            if cond_matches(cond, record, winds) {
                let gained = if record.concealed {
                    edge.concealed_value
                } else {
                    edge.value
                };
                if gained > 0 {
                    ledger.add(ledger_line(gained, edge, record));
                }
                let result =
                    node_value(graph, edge.target, &records[1..], value + gained, winds, ledger);
                if result > 0 {
                    return result;
                }
            }
        }
    }
    // no edge wants this record: drop it and try again from the same node
    node_value(graph, node_idx, &records[1..], value, winds, ledger)
}

fn ledger_line(gained: i32, edge: &Edge, record: &GroupRecord) -> String {
    let facing = if record.concealed { " concealed" } else { "" };
    let members = record
        .tiles
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{} for{} {} ({})", gained, facing, edge.label, members)
}

#[inline]
fn kind_bit(kind: GroupKind) -> Mask {
    1 << kind.bin()
}

fn cond_matches(cond: &GroupCond, record: &GroupRecord, winds: Winds) -> bool {
    if cond.kinds & kind_bit(record.kind) == 0 {
        return false;
    }
    let facing_ok = match cond.facing {
        FacingCond::Either => true,
        FacingCond::Open => !record.concealed,
        FacingCond::Concealed => record.concealed,
    };
    if !facing_ok {
        return false;
    }
    if !face_matches(cond.face, record, winds) {
        return false;
    }
    if !suit_matches(cond.suit, record.anchor()) {
        return false;
    }
    if !cond.tiles.is_empty() && cond.tiles != record.tiles {
        return false;
    }
    true
}

fn face_matches(face: FaceCond, record: &GroupRecord, winds: Winds) -> bool {
    let anchor = record.anchor();
    let spans_run = matches!(record.kind, GroupKind::Connected | GroupKind::Chow);
    let last = record.tiles[record.tiles.len() - 1];
    match face {
        FaceCond::Any => true,
        // for runs both end tiles must be simple; the middle then is too
        FaceCond::Simple => {
            if spans_run {
                tiles::is_simple(anchor) && tiles::is_simple(last)
            } else {
                tiles::is_simple(anchor)
            }
        }
        // a run is a terminal run when either end touches a terminal
        FaceCond::Terminal => {
            if spans_run {
                tiles::is_terminal(anchor) || tiles::is_terminal(last)
            } else {
                tiles::is_terminal(anchor)
            }
        }
        FaceCond::Numeral => tiles::is_numeral(anchor),
        FaceCond::Rank(n) => tiles::face_rank(anchor) == Some(n as usize - 1),
        FaceCond::Wind => tiles::is_wind(anchor),
        FaceCond::Exact(tile) => anchor == tile,
        FaceCond::RoundWind => anchor == winds.round,
        FaceCond::OwnWind => anchor == winds.seat,
        FaceCond::Dragon => tiles::is_dragon(anchor),
        FaceCond::Honour => tiles::is_honour(anchor),
        FaceCond::Flower => tiles::is_flower(anchor),
        FaceCond::Season => tiles::is_season(anchor),
    }
}

fn suit_matches(suit: SuitCond, anchor: usize) -> bool {
    match suit {
        SuitCond::Any => true,
        SuitCond::Bamboo => tiles::suit(anchor) == Suit::Bamboo,
        SuitCond::Characters => tiles::suit(anchor) == Suit::Characters,
        SuitCond::Dots => tiles::suit(anchor) == Suit::Dots,
        SuitCond::Honours => tiles::suit(anchor) == Suit::Honours,
        SuitCond::Bonus => tiles::suit(anchor) == Suit::Bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::load_graphs;

    fn winds() -> Winds {
        Winds::new(tiles::EAST, tiles::SOUTH)
    }

    fn rec(kind: GroupKind, tile: usize, concealed: bool) -> GroupRecord {
        GroupRecord::new(kind, tile, concealed)
    }

    const COUNTING: &str = "\
[dfsa]
name=four pungs and a pair
value=320
[node]
name=start
[path]
conditional=pung
lnode=s1
[/path]
[/node]
[node]
name=s1
[path]
conditional=pung
lnode=s2
[/path]
[/node]
[node]
name=s2
[path]
conditional=pung
lnode=s3
[/path]
[/node]
[node]
name=s3
[path]
conditional=pung
lnode=s4
[/path]
[/node]
[node]
name=s4
[path]
conditional=pair
lnode=done
[/path]
[/node]
[node]
name=done
[path]
conditional=empty
lnode=accept
[/path]
[/node]
[/dfsa]
";

    const POINTS: &str = "\
[dfsa]
name=tilepoints
value=0
[node]
name=start
[path]
conditional=pung dragon
value=4
lnode=start
[/path]
[path]
conditional=pung terminal
value=4
lnode=start
[/path]
[path]
conditional=pung simple
value=2
lnode=start
[/path]
[path]
conditional=pair roundwind
value=2
lnode=start
[/path]
[path]
conditional=single flower
value=4
lnode=start
[/path]
[/node]
[/dfsa]
";

    // ============ Acceptance ============

    #[test]
    fn test_counting_graph_accepts_exact_shape() {
        let report = load_graphs(COUNTING, 0);
        let graph = report.graph("four pungs and a pair").unwrap();
        let records = vec![
            rec(GroupKind::Pung, 0, false),
            rec(GroupKind::Pung, 9, true),
            rec(GroupKind::Pung, 18, false),
            rec(GroupKind::Pung, 27, true),
            rec(GroupKind::Pair, 31, true),
        ];
        assert!(accept(graph, &records, winds()));

        let mut ledger = Ledger::new();
        assert_eq!(accept_value(graph, &records, winds(), &mut ledger), 320);
        assert_eq!(ledger.lines(), ["320 for four pungs and a pair"]);
    }

    #[test]
    fn test_counting_graph_rejects_wrong_shape() {
        let report = load_graphs(COUNTING, 0);
        let graph = report.graph("four pungs and a pair").unwrap();
        let records = vec![
            rec(GroupKind::Chow, 0, true),
            rec(GroupKind::Pung, 9, false),
            rec(GroupKind::Pung, 18, false),
            rec(GroupKind::Pung, 27, false),
            rec(GroupKind::Pair, 31, false),
        ];
        let mut ledger = Ledger::new();
        assert!(!accept(graph, &records, winds()));
        assert_eq!(accept_value(graph, &records, winds(), &mut ledger), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_accepting_node_ignores_leftovers() {
        let text = "\
[dfsa]
name=has a kong
value=10
[node]
name=start
[path]
conditional=kong
lnode=accept
[/path]
[/node]
[/dfsa]
";
        let report = load_graphs(text, 0);
        let graph = report.graph("has a kong").unwrap();
        let records = vec![
            rec(GroupKind::Kong, 31, false),
            rec(GroupKind::Chow, 3, true),
            rec(GroupKind::Pair, 9, true),
        ];
        assert!(accept(graph, &records, winds()));
    }

    #[test]
    fn test_empty_condition_requires_exhaustion() {
        let report = load_graphs(COUNTING, 0);
        let graph = report.graph("four pungs and a pair").unwrap();
        // one extra record past the pair: the empty edge cannot fire
        let records = vec![
            rec(GroupKind::Pung, 0, false),
            rec(GroupKind::Pung, 9, false),
            rec(GroupKind::Pung, 18, false),
            rec(GroupKind::Pung, 27, false),
            rec(GroupKind::Pair, 31, false),
            rec(GroupKind::Single, 5, true),
        ];
        assert!(!accept(graph, &records, winds()));
    }

    // ============ Accumulation ============

    #[test]
    fn test_accumulate_sums_and_skips() {
        let report = load_graphs(POINTS, 0);
        let graph = report.graph("tilepoints").unwrap();
        let records = vec![
            rec(GroupKind::Chow, 3, true),          // no edge wants chows
            rec(GroupKind::Pung, 5, false),         // simple: 2
            rec(GroupKind::Pung, 8, true),          // terminal, concealed: 8
            rec(GroupKind::Pung, 31, false),        // dragon: 4
            rec(GroupKind::Pair, tiles::EAST, true), // round wind pair, concealed: 4
            rec(GroupKind::Single, 35, false),      // flower: 4
        ];
        let mut ledger = Ledger::new();
        let total = accumulate(graph, &records, winds(), &mut ledger);
        assert_eq!(total, 2 + 8 + 4 + 4 + 4);
        assert_eq!(ledger.lines().len(), 5);
        assert!(ledger.lines()[1].contains("concealed pung/terminal"));
        assert!(ledger.lines()[4].contains("single/flower (35)"));
    }

    #[test]
    fn test_accumulate_never_rejects() {
        let report = load_graphs(POINTS, 0);
        let graph = report.graph("tilepoints").unwrap();
        let records = vec![rec(GroupKind::Chow, 0, false), rec(GroupKind::Chow, 9, true)];
        let mut ledger = Ledger::new();
        assert_eq!(accumulate(graph, &records, winds(), &mut ledger), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_accumulate_is_monotone_in_records() {
        let report = load_graphs(POINTS, 0);
        let graph = report.graph("tilepoints").unwrap();
        let mut records = vec![rec(GroupKind::Pung, 31, false)];
        let mut ledger = Ledger::new();
        let one = accumulate(graph, &records, winds(), &mut ledger);
        records.push(rec(GroupKind::Pung, 32, false));
        let two = accumulate(graph, &records, winds(), &mut ledger);
        assert!(two >= one);
        assert_eq!(two, 8);
    }

    // ============ Condition details ============

    #[test]
    fn test_facing_conditions() {
        let concealed_only = match crate::ruleset::parse_condition("concealed_kong").unwrap() {
            Condition::Group(c) => c,
            Condition::Empty => unreachable!(),
        };
        assert!(cond_matches(
            &concealed_only,
            &rec(GroupKind::Kong, 5, true),
            winds()
        ));
        assert!(!cond_matches(
            &concealed_only,
            &rec(GroupKind::Kong, 5, false),
            winds()
        ));
    }

    #[test]
    fn test_terminal_run_matches_on_either_end() {
        let cond = match crate::ruleset::parse_condition("chow terminal").unwrap() {
            Condition::Group(c) => c,
            Condition::Empty => unreachable!(),
        };
        // 1,2,3 and 7,8,9 are terminal runs; 4,5,6 is not
        assert!(cond_matches(&cond, &rec(GroupKind::Chow, 0, false), winds()));
        assert!(cond_matches(&cond, &rec(GroupKind::Chow, 6, false), winds()));
        assert!(!cond_matches(&cond, &rec(GroupKind::Chow, 3, false), winds()));
    }

    #[test]
    fn test_own_wind_follows_context() {
        let cond = match crate::ruleset::parse_condition("pung ownwind").unwrap() {
            Condition::Group(c) => c,
            Condition::Empty => unreachable!(),
        };
        let south_pung = rec(GroupKind::Pung, tiles::SOUTH, false);
        assert!(cond_matches(&cond, &south_pung, winds()));
        let other_seat = Winds::new(tiles::EAST, tiles::WEST);
        assert!(!cond_matches(&cond, &south_pung, other_seat));
    }

    #[test]
    fn test_exact_tile_list_must_equal_members() {
        let cond = match crate::ruleset::parse_condition("pair any any 31,31").unwrap() {
            Condition::Group(c) => c,
            Condition::Empty => unreachable!(),
        };
        assert!(cond_matches(&cond, &rec(GroupKind::Pair, 31, true), winds()));
        assert!(!cond_matches(&cond, &rec(GroupKind::Pair, 32, true), winds()));
    }
}
