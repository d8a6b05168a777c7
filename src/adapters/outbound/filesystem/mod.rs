/// Filesystem adapters: package enumeration and report files
mod delimited_file_sink;
mod local_folder_source;
mod nuget_package_source;
mod nuspec_reader;
mod project_manifest_source;

pub use delimited_file_sink::DelimitedFileSink;
pub use local_folder_source::LocalFolderPackageSource;
pub use nuget_package_source::{InputLayout, NuGetPackageSource};
pub use nuspec_reader::NuspecReader;
pub use project_manifest_source::{PackageReference, ProjectManifestPackageSource};
