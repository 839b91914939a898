/// Double-buffered heat grid.
///
/// Both buffers are row-major (`y * width + x`). `current` is the last
/// committed state; `staging` is scratch space that is only meaningful
/// between [`GridBuffer::begin_tick`] and [`GridBuffer::commit`].
#[derive(Clone, Debug)]
pub struct GridBuffer {
    width: usize,
    height: usize,
    buffers: [Vec<i32>; 2],
    current: usize,
}

impl GridBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        GridBuffer {
            width,
            height,
            buffers: [vec![0; size], vec![0; size]],
            current: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Committed value at `(x, y)`, `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<i32> {
        self.index(x, y).map(|i| self.buffers[self.current][i])
    }

    pub fn current(&self) -> &[i32] {
        &self.buffers[self.current]
    }

    /// Reallocate both buffers at the new size. All heat is discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        let size = width * height;
        self.width = width;
        self.height = height;
        self.buffers = [vec![0; size], vec![0; size]];
        self.current = 0;
    }

    /// Seed staging with the committed state.
    pub fn begin_tick(&mut self) {
        let (current, staging) = self.split_mut();
        staging.copy_from_slice(current);
    }

    /// Committed buffer alongside the mutable staging buffer.
    pub fn split_mut(&mut self) -> (&[i32], &mut [i32]) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.current == 0 {
            (first[0].as_slice(), second[0].as_mut_slice())
        } else {
            (second[0].as_slice(), first[0].as_mut_slice())
        }
    }

    pub fn staging_mut(&mut self) -> &mut [i32] {
        self.split_mut().1
    }

    /// Publish staging as the new committed state. No cells are copied.
    pub fn commit(&mut self) {
        self.current ^= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_zeroed() {
        let g = GridBuffer::new(4, 3);
        assert_eq!(g.dimensions(), (4, 3));
        assert_eq!(g.current().len(), 12);
        assert!(g.current().iter().all(|&v| v == 0));
    }

    #[test]
    fn out_of_range_reads_are_none() {
        let g = GridBuffer::new(2, 2);
        assert_eq!(g.get(1, 1), Some(0));
        assert_eq!(g.get(2, 0), None);
        assert_eq!(g.get(0, 2), None);
    }

    #[test]
    fn staging_is_invisible_until_commit() {
        let mut g = GridBuffer::new(3, 2);
        g.begin_tick();
        let i = g.index(2, 1).unwrap();
        g.staging_mut()[i] = 7;
        assert_eq!(g.get(2, 1), Some(0));

        g.commit();
        assert_eq!(g.get(2, 1), Some(7));
    }

    #[test]
    fn begin_tick_copies_committed_state() {
        let mut g = GridBuffer::new(2, 2);
        g.begin_tick();
        g.staging_mut().copy_from_slice(&[1, 2, 3, 4]);
        g.commit();

        g.begin_tick();
        let (current, staging) = g.split_mut();
        assert_eq!(current, staging);
        assert_eq!(staging, &[1, 2, 3, 4]);
    }

    #[test]
    fn resize_discards_heat() {
        let mut g = GridBuffer::new(2, 2);
        g.begin_tick();
        g.staging_mut().fill(9);
        g.commit();

        g.resize(3, 1);
        assert_eq!(g.dimensions(), (3, 1));
        assert_eq!(g.current(), &[0, 0, 0]);
        g.begin_tick();
        assert_eq!(g.staging_mut(), &[0, 0, 0]);
    }
}
