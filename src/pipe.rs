//! Two-stage byte relay: a reader thread and a writer thread connected by a
//! bounded in-memory channel.

use std::io::{self, Read, Write};
use std::thread;

use crossbeam::channel::bounded;

/// Bytes read per block; one block is one channel message.
pub const BLOCK_SIZE: usize = 64 * 1024;

/// Copies everything from `reader` to `writer` through a bounded pipe.
///
/// The reader stage fills blocks and sends them downstream, blocking while
/// the channel already holds `capacity` unwritten blocks. The writer stage
/// drains the channel in order. Both stages are joined before returning and
/// the first error from either side is the one reported. Returns the number
/// of bytes written.
pub fn copy_pipelined<R, W>(mut reader: R, mut writer: W, capacity: usize) -> io::Result<u64>
where
    R: Read + Send,
    W: Write + Send,
{
    let (tx, rx) = bounded::<Vec<u8>>(capacity.max(1));
    thread::scope(|scope| {
        let producer = scope.spawn(move || -> io::Result<()> {
            let mut block = vec![0u8; BLOCK_SIZE];
            loop {
                let read = reader.read(&mut block)?;
                if read == 0 {
                    return Ok(());
                }
                if tx.send(block[..read].to_vec()).is_err() {
                    // the writer hung up; its error is reported after the join
                    return Ok(());
                }
            }
        });
        let consumer = scope.spawn(move || -> io::Result<u64> {
            let mut written = 0u64;
            for block in rx {
                writer.write_all(&block)?;
                written += block.len() as u64;
            }
            writer.flush()?;
            Ok(written)
        });

        let produced = producer
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "reader stage panicked"))?;
        let written = consumer
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "writer stage panicked"))?;
        produced?;
        written
    })
}
