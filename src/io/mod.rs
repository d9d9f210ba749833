mod data_reader;
mod data_reader_file;
mod data_reader_http;
mod data_reader_s3;
mod data_writer;

pub use data_reader::{data_reader_from_locator, DataReader, DataReaderTrait};
pub use data_reader_file::DataReaderFile;
pub use data_reader_http::DataReaderHttp;
pub use data_reader_s3::DataReaderS3;
pub use data_writer::{DataWriterFile, DataWriterTrait};
