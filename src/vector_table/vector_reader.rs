use std::{
    fs::File,
    io::{BufRead, BufReader, Seek, SeekFrom},
};

use camino::Utf8Path;

use crate::{constants::StreamPosition, orbitbuild_errors::OrbitBuildError};

use super::{
    header_scanner::{scan_header, VectorHeader},
    vector_record::{decode_record, DecodedRecord, Sample},
};

/// Seekable reader over the records of one vector table.
///
/// The header is scanned on construction; afterwards each call to
/// [`next_record`](VectorReader::next_record) decodes one record and tags the resulting
/// [`Sample`] with the byte offset it started at. [`seek_to`](VectorReader::seek_to) jumps
/// back to such an offset for a second pass.
#[derive(Debug)]
pub struct VectorReader<R> {
    inner: R,
    header: VectorHeader,
}

impl VectorReader<BufReader<File>> {
    /// Open a vector table file and scan its header.
    pub fn open(path: &Utf8Path) -> Result<Self, OrbitBuildError> {
        let file = File::open(path)?;
        VectorReader::new(BufReader::new(file))
    }
}

impl<R: BufRead + Seek> VectorReader<R> {
    /// Wrap a stream positioned at the start of a vector table and scan its header.
    pub fn new(mut inner: R) -> Result<Self, OrbitBuildError> {
        let header = scan_header(&mut inner)?;
        Ok(VectorReader { inner, header })
    }

    pub fn header(&self) -> &VectorHeader {
        &self.header
    }

    /// Decode the next record, capturing its offset before the first line is read.
    pub fn next_record(&mut self) -> Result<DecodedRecord, OrbitBuildError> {
        let position = self.inner.stream_position()?;
        decode_record(&mut self.inner, position)
    }

    /// Move back (or forward) to a record offset previously stored on a [`Sample`].
    pub fn seek_to(&mut self, position: StreamPosition) -> Result<(), OrbitBuildError> {
        self.inner.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Iterate over the remaining samples until `$$$EOE`.
    ///
    /// The iterator stops after the end marker or after the first error, which it yields.
    pub fn samples(&mut self) -> Samples<'_, R> {
        Samples {
            reader: self,
            done: false,
        }
    }
}

/// Iterator returned by [`VectorReader::samples`].
pub struct Samples<'a, R> {
    reader: &'a mut VectorReader<R>,
    done: bool,
}

impl<R: BufRead + Seek> Iterator for Samples<'_, R> {
    type Item = Result<Sample, OrbitBuildError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_record() {
            Ok(DecodedRecord::Sample(sample)) => Some(Ok(sample)),
            Ok(DecodedRecord::EndOfStream) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod vector_reader_test {
    use std::io::Cursor;

    use super::*;
    use crate::orbitbuild_errors::ParseVectorError;

    const TABLE: &str = "\
*******************************************************************************
 Revised: Jul 31, 2013             Venus                                  299
Step-size       : 10080 minutes
$$$SOE
2458100.500000000 = A.D. 2017-Dec-13 00:00:00.0000 TDB
 X =-7.180000000000000E-01 Y = 1.200000000000000E-02 Z = 4.100000000000000E-02
 VX=-4.848133460361240E-04 VY=-2.017003186766924E-02 VZ=-2.748034462099498E-04
 LT= 4.165735432103571E-03 RG= 7.212810360000000E-01 RR=-9.479959791021418E-06
2458107.500000000 = A.D. 2017-Dec-20 00:00:00.0000 TDB
 X =-7.100000000000000E-01 Y =-1.300000000000000E-01 Z = 3.900000000000000E-02
 VX= 3.201133460361240E-03 VY=-1.997003186766924E-02 VZ=-4.148034462099498E-04
 LT= 4.175735432103571E-03 RG= 7.228432230000000E-01 RR= 1.179959791021418E-05
$$$EOE
*******************************************************************************
";

    #[test]
    fn test_samples_and_seek_back() {
        let mut reader = VectorReader::new(Cursor::new(TABLE)).unwrap();
        assert_eq!(reader.header().body_name, "Venus");
        assert_eq!(reader.header().step_size, 10080);

        let samples: Vec<Sample> = reader.samples().collect::<Result<_, _>>().unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples[0].position < samples[1].position);
        assert_eq!(samples[1].jd, 2458107.5);

        reader.seek_to(samples[1].position).unwrap();
        assert_eq!(
            reader.next_record().unwrap(),
            DecodedRecord::Sample(samples[1].clone())
        );
        assert_eq!(reader.next_record().unwrap(), DecodedRecord::EndOfStream);
    }

    #[test]
    fn test_samples_stop_on_error() {
        let broken = TABLE.replace(" Y =-1.300000000000000E-01", "");
        let mut reader = VectorReader::new(Cursor::new(broken)).unwrap();

        let mut samples = reader.samples();
        assert!(samples.next().unwrap().is_ok());
        assert!(matches!(
            samples.next(),
            Some(Err(OrbitBuildError::VectorTableFormat(
                ParseVectorError::InvalidCoordinates(_)
            )))
        ));
        assert!(samples.next().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let result = VectorReader::open(Utf8Path::new("does/not/exist.txt"));
        assert!(matches!(result, Err(OrbitBuildError::IoError(_))));
    }
}
