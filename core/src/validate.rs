use crate::engine::EngineConfig;
use crate::graph::ConnectionGraph;
use crate::network::Network;
use crate::report::{BlastError, BlastWarning, ValidationReport};
use std::collections::HashMap;

/// Run the fixed check sequence against a built graph. Checks are independent
/// and all collected; the caller sees every defect in one pass.
pub fn validate_graph(
    network: &Network,
    graph: &ConnectionGraph,
    config: &EngineConfig,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_duplicates(network, graph, &mut report);
    check_self_loops(network, &mut report);
    check_orphans(network, graph, &mut report);
    check_starting_holes(network, graph, &mut report);
    check_cycles(network, graph, &mut report);
    check_zero_delays(network, config, &mut report);

    report
}

/// Two connectors on the same ordered hole pair. The reverse pair is not a
/// duplicate; it is a 2-cycle and the cycle check names it.
fn check_duplicates(network: &Network, graph: &ConnectionGraph, report: &mut ValidationReport) {
    let mut first_seen: HashMap<(usize, usize), usize> = HashMap::new();
    for (index, connection) in network.connections.iter().enumerate() {
        let (Some(from), Some(to)) = (
            graph.index_of(&connection.from_hole_id),
            graph.index_of(&connection.to_hole_id),
        ) else {
            continue;
        };
        match first_seen.get(&(from, to)) {
            Some(&first) => report.errors.push(BlastError::DuplicateConnection {
                first_id: network.connections[first].id.clone(),
                second_id: connection.id.clone(),
                from_hole_id: connection.from_hole_id.clone(),
                to_hole_id: connection.to_hole_id.clone(),
            }),
            None => {
                first_seen.insert((from, to), index);
            }
        }
    }
}

fn check_self_loops(network: &Network, report: &mut ValidationReport) {
    for connection in &network.connections {
        if connection.from_hole_id == connection.to_hole_id {
            report.errors.push(BlastError::SelfLoop {
                connection_id: connection.id.clone(),
                hole_id: connection.from_hole_id.clone(),
            });
        }
    }
}

/// Isolated holes may be deliberately left out of this blast, so this is a
/// warning. A single-point network is not an orphan.
fn check_orphans(network: &Network, graph: &ConnectionGraph, report: &mut ValidationReport) {
    if network.points.len() <= 1 {
        return;
    }
    for (index, point) in network.points.iter().enumerate() {
        if !graph.is_wired(index) {
            report.warnings.push(BlastWarning::OrphanHole {
                hole_id: point.id.clone(),
            });
        }
    }
}

/// Every multi-hole component needs a time-zero entry: a flagged starting
/// hole, or a hole nothing feeds (implicit origin, warned about so the
/// missing flag gets added upstream).
fn check_starting_holes(network: &Network, graph: &ConnectionGraph, report: &mut ValidationReport) {
    let n = graph.point_count();
    let mut component = vec![usize::MAX; n];
    let mut components: Vec<Vec<usize>> = Vec::new();

    // Weakly-connected components over the undirected view, in point order
    // so reports are deterministic.
    for root in 0..n {
        if component[root] != usize::MAX || !graph.is_wired(root) {
            continue;
        }
        let id = components.len();
        let mut members = vec![root];
        component[root] = id;
        let mut queue = vec![root];
        while let Some(point) = queue.pop() {
            for edge in graph.outgoing(point).iter().chain(graph.incoming(point)) {
                if component[edge.to] == usize::MAX {
                    component[edge.to] = id;
                    members.push(edge.to);
                    queue.push(edge.to);
                }
            }
        }
        members.sort_unstable();
        components.push(members);
    }

    for members in &components {
        if members.len() <= 1 {
            continue;
        }
        let mut has_origin = false;
        for &point in members {
            if graph.is_origin(point) {
                has_origin = true;
                if !graph.is_flagged_origin(point) {
                    report.warnings.push(BlastWarning::ImplicitStartingHole {
                        hole_id: network.points[point].id.clone(),
                    });
                }
            }
        }
        if !has_origin {
            report.errors.push(BlastError::MissingStartingHole {
                hole_id: network.points[members[0]].id.clone(),
                component_size: members.len(),
            });
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// Iterative three-color depth-first traversal. A back edge into a gray hole
/// closes a cycle; the full gray path from that hole is reported so the
/// planner can see the loop, not just that one exists.
fn check_cycles(network: &Network, graph: &ConnectionGraph, report: &mut ValidationReport) {
    let n = graph.point_count();
    let mut mark = vec![Mark::White; n];

    for root in 0..n {
        if mark[root] != Mark::White {
            continue;
        }
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        let mut path: Vec<usize> = vec![root];
        mark[root] = Mark::Gray;

        while let Some(&mut (point, ref mut next_edge)) = stack.last_mut() {
            if let Some(edge) = graph.outgoing(point).get(*next_edge) {
                *next_edge += 1;
                match mark[edge.to] {
                    Mark::White => {
                        mark[edge.to] = Mark::Gray;
                        path.push(edge.to);
                        stack.push((edge.to, 0));
                    }
                    Mark::Gray => {
                        if let Some(start) = path.iter().position(|&p| p == edge.to) {
                            report.errors.push(BlastError::Cycle {
                                path: path[start..]
                                    .iter()
                                    .map(|&p| network.points[p].id.clone())
                                    .collect(),
                            });
                        }
                    }
                    Mark::Black => {}
                }
            } else {
                mark[point] = Mark::Black;
                path.pop();
                stack.pop();
            }
        }
    }
}

/// Zero delay between distinct holes means simultaneous firing, which is
/// legal but suspicious in bulk: past the limit it usually means the delay
/// column was never filled in.
fn check_zero_delays(network: &Network, config: &EngineConfig, report: &mut ValidationReport) {
    let zero_ids: Vec<String> = network
        .connections
        .iter()
        .filter(|c| c.delay_us == 0 && c.from_hole_id != c.to_hole_id)
        .map(|c| c.id.clone())
        .collect();
    if zero_ids.len() > config.zero_delay_warn_limit {
        report.warnings.push(BlastWarning::ZeroDelaySpread {
            count: zero_ids.len(),
            limit: config.zero_delay_warn_limit,
            connection_ids: zero_ids,
        });
    }
}
