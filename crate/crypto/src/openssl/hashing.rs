use openssl::md::{Md, MdRef};

/// Hash functions usable as the OAEP digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashingAlgorithm {
    SHA1,
    SHA224,
    #[default]
    SHA256,
    SHA384,
    SHA512,
}

#[must_use]
pub fn hashing_algorithm_to_openssl_ref(hashing_algorithm: HashingAlgorithm) -> &'static MdRef {
    match hashing_algorithm {
        HashingAlgorithm::SHA1 => Md::sha1(),
        HashingAlgorithm::SHA224 => Md::sha224(),
        HashingAlgorithm::SHA256 => Md::sha256(),
        HashingAlgorithm::SHA384 => Md::sha384(),
        HashingAlgorithm::SHA512 => Md::sha512(),
    }
}
