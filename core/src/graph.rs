use crate::network::Network;
use crate::report::BlastError;
use std::collections::HashMap;

/// Directed edge in dense-index form. `connection` indexes into
/// `Network::connections` so diagnostics can name the physical connector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: usize,
    pub delay_us: u64,
    pub connection: usize,
}

/// Adjacency over dense point indices. Built once per snapshot in O(P + C);
/// holds no behavior beyond lookup.
pub struct ConnectionGraph {
    outgoing: Vec<Vec<Edge>>,
    incoming: Vec<Vec<Edge>>,
    index_of: HashMap<String, usize>,
    /// Point has an outgoing connection flagged is_starting_hole.
    flagged_origin: Vec<bool>,
}

impl ConnectionGraph {
    /// Index the snapshot. Every connection naming a hole absent from the
    /// point set is collected as a referential error; any such error aborts
    /// the build, since a partial graph would silently drop connectors.
    pub fn build(network: &Network) -> Result<Self, Vec<BlastError>> {
        let point_count = network.points.len();
        let mut index_of = HashMap::with_capacity(point_count);
        for (index, point) in network.points.iter().enumerate() {
            index_of.insert(point.id.clone(), index);
        }

        let mut errors = Vec::new();
        let mut outgoing = vec![Vec::new(); point_count];
        let mut incoming = vec![Vec::new(); point_count];
        let mut flagged_origin = vec![false; point_count];

        for (index, connection) in network.connections.iter().enumerate() {
            let from = index_of.get(&connection.from_hole_id).copied();
            let to = index_of.get(&connection.to_hole_id).copied();
            if from.is_none() {
                errors.push(BlastError::UnknownHole {
                    connection_id: connection.id.clone(),
                    hole_id: connection.from_hole_id.clone(),
                });
            }
            if to.is_none() {
                errors.push(BlastError::UnknownHole {
                    connection_id: connection.id.clone(),
                    hole_id: connection.to_hole_id.clone(),
                });
            }
            let (Some(from), Some(to)) = (from, to) else {
                continue;
            };

            outgoing[from].push(Edge {
                to,
                delay_us: connection.delay_us,
                connection: index,
            });
            incoming[to].push(Edge {
                to: from,
                delay_us: connection.delay_us,
                connection: index,
            });
            if connection.is_starting_hole {
                flagged_origin[from] = true;
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            outgoing,
            incoming,
            index_of,
            flagged_origin,
        })
    }

    pub fn point_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn index_of(&self, hole_id: &str) -> Option<usize> {
        self.index_of.get(hole_id).copied()
    }

    pub fn outgoing(&self, point: usize) -> &[Edge] {
        &self.outgoing[point]
    }

    /// Incoming edges; `Edge::to` holds the upstream point here.
    pub fn incoming(&self, point: usize) -> &[Edge] {
        &self.incoming[point]
    }

    pub fn out_degree(&self, point: usize) -> usize {
        self.outgoing[point].len()
    }

    pub fn in_degree(&self, point: usize) -> usize {
        self.incoming[point].len()
    }

    pub fn is_flagged_origin(&self, point: usize) -> bool {
        self.flagged_origin[point]
    }

    /// Connected to the sequence at all, in either direction.
    pub fn is_wired(&self, point: usize) -> bool {
        !self.outgoing[point].is_empty() || !self.incoming[point].is_empty()
    }

    /// Seeded at time zero: flagged starting holes plus wired holes that
    /// nothing feeds (the legacy implicit-origin convention).
    pub fn is_origin(&self, point: usize) -> bool {
        self.is_wired(point) && (self.flagged_origin[point] || self.incoming[point].is_empty())
    }
}
