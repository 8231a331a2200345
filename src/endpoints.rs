use crate::error::ShellError;
use std::fs::{File, OpenOptions};
use std::os::fd::OwnedFd;
use std::process::Stdio;

/// Device that swallows the output of background jobs.
pub const NULL_SINK: &str = "/dev/null";

/// Readable end of an endpoint pair.
///
/// The descriptor is closed when the value is dropped, on every path.
#[derive(Debug)]
pub struct ReadEnd(OwnedFd);

/// Writable end of an endpoint pair, or an opened sink.
#[derive(Debug)]
pub struct WriteEnd(OwnedFd);

impl ReadEnd {
    /// Turn the end into a reader for the parent side of a redirect.
    pub fn into_reader(self) -> File {
        File::from(self.0)
    }
}

impl WriteEnd {
    /// Open the null device write-only.
    pub fn null_sink() -> Result<Self, ShellError> {
        let file = OpenOptions::new().write(true).open(NULL_SINK)?;
        Ok(Self(OwnedFd::from(file)))
    }

    pub fn into_writer(self) -> File {
        File::from(self.0)
    }
}

impl From<ReadEnd> for Stdio {
    fn from(end: ReadEnd) -> Self {
        Stdio::from(end.0)
    }
}

impl From<WriteEnd> for Stdio {
    fn from(end: WriteEnd) -> Self {
        Stdio::from(end.0)
    }
}

/// A connected pair of endpoints, created fresh for each piped or redirected job.
///
/// The pair is consumed by splitting it: one end goes to a child's standard
/// stream, the other stays with whoever continues the job.
#[derive(Debug)]
pub struct CommEndpoints {
    read: ReadEnd,
    write: WriteEnd,
}

impl CommEndpoints {
    pub fn pipe() -> Result<Self, ShellError> {
        let (read, write) = nix::unistd::pipe()?;
        Ok(Self {
            read: ReadEnd(read),
            write: WriteEnd(write),
        })
    }

    /// Hand out the writable end for a child's standard output; the readable end is returned alongside.
    pub fn split_for_write(self) -> (WriteEnd, ReadEnd) {
        (self.write, self.read)
    }

    /// Hand out the readable end for a child's standard input; the writable end is returned alongside.
    pub fn split_for_read(self) -> (ReadEnd, WriteEnd) {
        (self.read, self.write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    #[test]
    fn test_bytes_written_reach_reader() {
        let (write, read) = CommEndpoints::pipe().unwrap().split_for_write();
        let mut writer = write.into_writer();
        writer.write_all(b"through the pipe").unwrap();
        drop(writer);

        let mut buf = String::new();
        read.into_reader().read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "through the pipe");
    }

    #[test]
    fn test_dropping_writer_signals_end_of_stream() {
        let (read, write) = CommEndpoints::pipe().unwrap().split_for_read();
        drop(write);
        let mut buf = Vec::new();
        let n = read.into_reader().read_to_end(&mut buf).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    #[cfg(unix)]
    fn test_null_sink_accepts_writes() {
        let mut sink = WriteEnd::null_sink().unwrap().into_writer();
        sink.write_all(b"discarded").unwrap();
    }
}
