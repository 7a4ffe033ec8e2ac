/// Vendor-assigned identifier of an accepted message (Aliyun `BizId`)
pub type MessageId = String;
