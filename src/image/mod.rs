pub mod io;
pub mod mask;
pub mod scene;
pub mod traits;
pub mod vector;

pub use self::mask::MaskImage;
pub use self::scene::SceneImage;
pub use self::traits::ImageView;
pub use self::vector::{Sample, VectorImage};
