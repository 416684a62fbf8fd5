use clap::ValueEnum;

pub mod cmds;
pub mod driver;
pub mod emit;
pub mod error;
pub mod ir;
pub mod resolver;
pub mod symbols;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Target {
    /* Plain C++ bindings. Accepted for vocabulary compatibility; not implemented. */
    Cpp,
    /* Java bindings. Accepted for vocabulary compatibility; not implemented. */
    Java,
    /* C++ bindings against the NDK-flavored Polaris runtime. The only wired target. */
    #[value(name = "ndk-cpp")]
    NdkCpp,
}
