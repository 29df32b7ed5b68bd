mod mock_file_loader;
mod pdf_adapter;

pub use mock_file_loader::MockFileLoader;
pub use pdf_adapter::PdfAdapter;
