//! JPL Horizons *vector table* text export reader.
//!
//! Horizons can export the state of one target body relative to a center body as a plain
//! text table. This module reads the "Vector" layout (revision of Jul 31, 2013) one record
//! at a time, so that a file never has to be held in memory.
//!
//! - [`header_scanner`] — Consumes the preamble, extracts the body name and the sample
//!   interval, and stops right after the `$$$SOE` marker.
//! - [`vector_record`] — Decodes one 4-line record into a [`Sample`](vector_record::Sample)
//!   or reports the `$$$EOE` end of the data block.
//! - [`vector_reader`] — Seekable wrapper tying both together: captures the byte offset of
//!   every record so a later pass can jump back to it.
//!
//! # File layout
//!
//! ```text
//! *******************************************************************************   banner (ignored)
//!  Revised: Jul 31, 2013             Mars Barycenter                        4    token #4 = body name
//!  ...
//! Step-size       : 1440 minutes                                                    sample interval
//!  ...
//! $$$SOE
//! 2458143.500000000 = A.D. 2018-Jan-25 00:00:00.0000 TDB                            record line 1: JD
//!  X = 1.309801081200231E+00 Y = 5.452635553461058E-01 Z =-2.071897914000000E-02    record line 2: position (AU)
//!  VX=-4.848133460361240E-03 VY= 1.417003186766924E-02 VZ= 4.148034462099498E-04    record line 3: velocity (ignored)
//!  LT= 8.194971050395787E-03 RG= 1.418915252296812E+00 RR= 9.479959791021418E-05    record line 4: RG = sun distance
//!  ...
//! $$$EOE
//!  ...                                                                              trailer (ignored)
//! ```
//!
//! **Notes**
//! 1) The spacing around `=` is not guaranteed; a negative value may abut the sign.
//! 2) Some exports omit the `LT/RG/RR` line content; the sample then has no distance.
//!
//! # See also
//! * [`crate::apsis_detector`] — Consumes the samples of the first pass.
//! * [`crate::orbit_segment`] — Replays the chosen orbit in the second pass.
use std::io::{self, BufRead};

pub mod header_scanner;
pub mod vector_reader;
pub mod vector_record;

/// Read one line into `buffer`, replacing its previous content.
///
/// Return
/// ----------
/// * `Ok(false)` at end of file, `Ok(true)` otherwise.
pub(crate) fn read_line<R: BufRead>(reader: &mut R, buffer: &mut String) -> io::Result<bool> {
    buffer.clear();
    Ok(reader.read_line(buffer)? != 0)
}
