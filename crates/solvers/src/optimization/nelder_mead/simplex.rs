/// A set of `N + 1` points in `N`-dimensional space.
///
/// Vertex order is significant. After ranking, the best vertex (lowest
/// objective) is first and the worst is last, and every transformation
/// reads and writes vertices by that position.
///
/// A simplex always holds exactly `N + 1` vertices; the solver validates
/// this when the simplex is built and no operation changes the count.
#[derive(Debug, Clone, PartialEq)]
pub struct Simplex<const N: usize> {
    vertices: Vec<[f64; N]>,
}

impl<const N: usize> Simplex<N> {
    /// Wraps vertices that are already known to number `N + 1`.
    pub(super) fn new(vertices: Vec<[f64; N]>) -> Self {
        debug_assert_eq!(vertices.len(), N + 1);
        Self { vertices }
    }

    /// Returns the vertices in their current order.
    #[must_use]
    pub fn vertices(&self) -> &[[f64; N]] {
        &self.vertices
    }

    /// Returns the first vertex, which is the best one after ranking.
    #[must_use]
    pub fn best(&self) -> &[f64; N] {
        &self.vertices[0]
    }

    /// Returns the last vertex, which is the worst one after ranking.
    #[must_use]
    pub fn worst(&self) -> &[f64; N] {
        &self.vertices[N]
    }

    /// Consumes the simplex and returns its vertices.
    #[must_use]
    pub fn into_vertices(self) -> Vec<[f64; N]> {
        self.vertices
    }

    /// Evaluates every vertex and stable-sorts them best first.
    ///
    /// Vertices are evaluated in their current order. Ties keep their
    /// relative order, and NaN objectives of either sign rank after `+∞`.
    ///
    /// Returns the objectives in the new vertex order.
    pub(super) fn rank<E>(
        &mut self,
        mut objective: impl FnMut(&[f64; N]) -> Result<f64, E>,
    ) -> Result<Vec<f64>, E> {
        let values = self
            .vertices
            .iter()
            .map(&mut objective)
            .collect::<Result<Vec<_>, _>>()?;

        let mut order: Vec<usize> = (0..values.len()).collect();
        // `total_cmp` alone sorts negative NaN ahead of everything.
        order.sort_by(|&a, &b| {
            let (fa, fb) = (values[a], values[b]);
            fa.is_nan()
                .cmp(&fb.is_nan())
                .then_with(|| fa.total_cmp(&fb))
        });

        self.vertices = order.iter().map(|&i| self.vertices[i]).collect();
        Ok(order.iter().map(|&i| values[i]).collect())
    }

    /// Returns the mean of every vertex except the worst.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn centroid(&self) -> [f64; N] {
        let others = &self.vertices[..N];
        let count = N as f64;
        std::array::from_fn(|j| others.iter().map(|v| v[j]).sum::<f64>() / count)
    }

    /// Reflects the worst vertex through `centroid`.
    ///
    /// Computes `worst + 2α (centroid - worst)`. With `α = 1` this is the
    /// textbook reflection `centroid + (centroid - worst)`.
    pub(super) fn reflected(&self, centroid: &[f64; N], alpha: f64) -> [f64; N] {
        let worst = self.worst();
        std::array::from_fn(|j| worst[j] + alpha * 2.0 * (centroid[j] - worst[j]))
    }

    /// Extends `reflected` further from `centroid` by a factor of `gamma`.
    pub(super) fn expanded(centroid: &[f64; N], reflected: &[f64; N], gamma: f64) -> [f64; N] {
        std::array::from_fn(|j| centroid[j] + gamma * (reflected[j] - centroid[j]))
    }

    /// Pulls the worst vertex toward `centroid` by a factor of `rho`.
    pub(super) fn contracted(&self, centroid: &[f64; N], rho: f64) -> [f64; N] {
        let worst = self.worst();
        std::array::from_fn(|j| centroid[j] + rho * (worst[j] - centroid[j]))
    }

    /// Replaces the worst vertex.
    pub(super) fn replace_worst(&mut self, vertex: [f64; N]) {
        self.vertices[N] = vertex;
    }

    /// Moves every vertex except the best toward the best by a factor of `sigma`.
    pub(super) fn shrink(&mut self, sigma: f64) {
        let best = self.vertices[0];
        for vertex in &mut self.vertices[1..] {
            *vertex = std::array::from_fn(|j| best[j] + sigma * (vertex[j] - best[j]));
        }
    }
}
