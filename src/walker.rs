//! Walkers: tokens that travel the edge graph one pixel per step.

use heapless::Vec;

use crate::color::Rgb;
use crate::rng::Rng;
use crate::topology::{self, Direction, VertexId};

/// A position on an edge of a solid, moving toward one of its endpoints.
///
/// On arriving at a vertex the walker picks a new outgoing edge from the
/// adjacency graph, never turning straight back.
#[derive(Debug, Clone, Copy)]
pub struct Walker {
    solid: u8,
    edge: u8,
    heading: Direction,
    offset: u16,
    /// Current paint color, changed freely by the owning animation.
    pub color: Rgb,
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}

impl Walker {
    pub const fn new() -> Self {
        Self {
            solid: 0,
            edge: 0,
            heading: Direction::AToB,
            offset: 0,
            color: Rgb::new(0, 0, 0),
        }
    }

    /// Place the walker. Out-of-range solid and edge arguments wrap.
    #[allow(clippy::cast_possible_truncation)]
    pub fn init(&mut self, solid: u8, edge: u8, heading: Direction, offset: u16, color: Rgb) {
        self.solid = solid & 1;
        self.edge = edge % topology::EDGES as u8;
        self.heading = heading;
        self.offset = offset;
        self.color = color;
    }

    pub const fn solid(&self) -> u8 {
        self.solid
    }

    pub const fn edge(&self) -> u8 {
        self.edge
    }

    pub const fn heading(&self) -> Direction {
        self.heading
    }

    pub const fn offset(&self) -> u16 {
        self.offset
    }

    /// Pixel index under the walker.
    pub fn current_pixel(&self) -> usize {
        let edge = topology::edge_info(self.solid, self.edge);
        let pixel = match self.heading {
            Direction::AToB => edge.pixel_a + self.offset,
            Direction::BToA => edge.pixel_b - self.offset,
        };
        pixel as usize
    }

    /// Advance one pixel; on passing the far endpoint, turn onto a new edge.
    ///
    /// The next vertex is drawn uniformly from the arrival vertex's
    /// neighbors minus the departure vertex. Every vertex has degree >= 3,
    /// so the candidate list is never empty.
    #[allow(clippy::cast_possible_truncation)]
    pub fn step(&mut self, rng: &mut Rng) {
        self.offset += 1;
        let edge = topology::edge_info(self.solid, self.edge);
        if self.offset <= edge.span() {
            return;
        }

        // Arrived at the endpoint we were heading toward.
        self.offset = 0;
        let (arrival, departure) = match self.heading {
            Direction::AToB => (edge.b, edge.a),
            Direction::BToA => (edge.a, edge.b),
        };

        let mut candidates: Vec<VertexId, 4> = Vec::new();
        for &neighbor in topology::adjacency(arrival) {
            if neighbor != departure {
                // Adjacency lists hold at most 4 entries.
                let _ = candidates.push(neighbor);
            }
        }
        let next = candidates[rng.below(candidates.len() as u32) as usize];

        let Some((edge, heading)) = topology::find_edge(self.solid, arrival, next) else {
            // Adjacency promised an edge between these vertices.
            panic!("no edge connects adjacent vertices");
        };
        self.edge = edge;
        self.heading = heading;
    }
}
