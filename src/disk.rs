//! Disk compaction: moving file blocks into free space and checksumming the result.

use tracing::debug;

use crate::error::{InputError, InputResult};

/// Identifier of a file; files are numbered in the order they appear on the disk map.
pub type FileId = usize;

/// A contiguous run of blocks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Span {
    start: usize,
    len: usize,
}

/// The dense disk map: alternating file and free-space lengths, one digit each.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiskMap {
    // indexed by FileId
    files: Vec<Span>,
    free: Vec<Span>,
}

impl DiskMap {
    /// Parse a single line of digits. Surrounding blank lines are ignored.
    pub fn parse(text: &str) -> InputResult<Self> {
        let mut lines = text.lines().enumerate().filter(|(_, line)| !line.trim().is_empty());
        let (index, line) = lines.next().ok_or(InputError::Empty)?;
        if let Some((extra, _)) = lines.next() {
            return Err(InputError::malformed(extra + 1, "disk map spans more than one line"));
        }

        let lengths = line.trim().chars()
            .map(|ch| ch.to_digit(10)
                .map(|digit| digit as usize)
                .ok_or_else(|| InputError::malformed(index + 1, format!("unexpected length {ch:?}"))))
            .collect::<InputResult<Vec<_>>>()?;

        Ok(Self::from_lengths(&lengths))
    }

    /// Lay out alternating file and free lengths, starting with a file.
    pub fn from_lengths(lengths: &[usize]) -> Self {
        let mut files = Vec::with_capacity(lengths.len() / 2 + 1);
        let mut free = Vec::with_capacity(lengths.len() / 2);
        let mut start = 0;

        for (index, &len) in lengths.iter().enumerate() {
            let span = Span { start, len };
            if index % 2 == 0 {
                files.push(span);
            } else if len > 0 {
                free.push(span);
            }
            start += len;
        }

        Self { files, free }
    }

    /// Number of files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total number of blocks, free space included.
    pub fn block_count(&self) -> usize {
        let end = |spans: &[Span]| spans.last().map_or(0, |span| span.start + span.len);
        end(&self.files).max(end(&self.free))
    }

    /// Every block in order, `None` where it is free.
    pub fn blocks(&self) -> Vec<Option<FileId>> {
        lay_out(&self.files, self.block_count())
    }

    /// Move single blocks from the end of the disk into the leftmost free block until no gaps remain,
    /// and return the checksum.
    pub fn compact_blocks(&self) -> u64 {
        let mut blocks = self.blocks();
        let (mut free, mut used) = (0, blocks.len());

        loop {
            while free < blocks.len() && blocks[free].is_some() {
                free += 1;
            }
            while used > 0 && blocks[used - 1].is_none() {
                used -= 1;
            }
            if free >= used {
                break;
            }

            blocks.swap(free, used - 1);
        }

        checksum(&blocks)
    }

    /// Move each whole file, highest id first, into the leftmost free span before it that can hold it,
    /// and return the checksum. Files that fit nowhere stay put.
    pub fn compact_files(&self) -> u64 {
        let mut files = self.files.clone();
        let mut free = self.free.clone();

        for (id, file) in files.iter_mut().enumerate().rev() {
            let Some(gap) = free.iter_mut()
                .take_while(|gap| gap.start < file.start)
                .find(|gap| gap.len >= file.len) else {
                continue;
            };

            debug!(id, from = file.start, to = gap.start, "moving file");
            file.start = gap.start;
            gap.start += file.len;
            gap.len -= file.len;
        }

        checksum(&lay_out(&files, self.block_count()))
    }
}

// files never extend past `len`, since they only ever move left
fn lay_out(files: &[Span], len: usize) -> Vec<Option<FileId>> {
    let mut blocks = vec![None; len];
    for (id, span) in files.iter().enumerate() {
        blocks[span.start..span.start + span.len].fill(Some(id));
    }
    blocks
}

/// Sum of block position times file id over every used block.
pub fn checksum(blocks: &[Option<FileId>]) -> u64 {
    blocks.iter()
        .enumerate()
        .filter_map(|(position, id)| id.map(|id| (position * id) as u64))
        .sum()
}

/// Draw blocks the way the puzzle does: the file id digit, or `.` for free space.
///
/// Ids above 9 are drawn modulo 10.
pub fn render(blocks: &[Option<FileId>]) -> String {
    blocks.iter()
        .map(|block| block.map_or('.', |id| char::from(b'0' + (id % 10) as u8)))
        .collect()
}
