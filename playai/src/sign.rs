use crate::Result;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer as _;

/// A wallet identity: the signing key and its derived public address.
/// Immutable after construction; exclusively owned by one worker.
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    pub fn new(private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key.parse()?;
        Ok(Self { signer })
    }

    /// EIP-55 checksummed address.
    pub fn address(&self) -> String {
        self.signer.address().to_string()
    }

    /// Signs `message` with the EIP-191 personal-sign scheme and returns
    /// the 65-byte signature as a 0x-prefixed hex string.
    pub async fn sign_message(&self, message: &str) -> Result<String> {
        let signature = self.signer.sign_message(message.as_bytes()).await?;
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn derives_checksummed_address() {
        let wallet = Wallet::new(TEST_KEY).unwrap();
        assert_eq!(
            wallet.address(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn rejects_garbage_key() {
        assert!(Wallet::new("not a key").is_err());
    }

    #[tokio::test]
    async fn signature_is_prefixed_hex() {
        let wallet = Wallet::new(TEST_KEY).unwrap();
        let signature = wallet.sign_message("hello").await.unwrap();
        assert!(signature.starts_with("0x"));
        // 65 signature bytes -> 130 hex chars
        assert_eq!(signature.len(), 132);
    }
}
