//! Service name shortening
//!
//! Maps the long names Cost Explorer reports to the short names and acronyms
//! people actually use, so report rows stay narrow.

/// Short display name for an AWS service. Unknown names pass through.
pub fn display_name(service: &str) -> &str {
    match service {
        "Amazon Relational Database Service" => "RDS",
        "Amazon Elastic Compute Cloud - Compute" => "EC2 Compute",
        "Amazon Elastic Compute Cloud" => "EC2",
        "EC2 - Other" => "EC2 Other",
        "Amazon Simple Storage Service" => "S3",
        "Amazon EC2 Container Registry (ECR)" => "ECR",
        "Amazon Virtual Private Cloud" => "VPC",
        "Amazon Elastic Load Balancing" => "ELB",
        "AmazonCloudWatch" => "CloudWatch",
        "AWS Global Accelerator" => "Global Accelerator",
        "Savings Plans for AWS Compute usage" => "Savings Plans",
        "Amazon CloudFront" => "CloudFront",
        "AWS Lambda" => "Lambda",
        "Amazon ElastiCache" => "ElastiCache",
        "Amazon Elasticsearch Service" => "Elasticsearch",
        "Amazon OpenSearch Service" => "OpenSearch",
        "AWS Key Management Service" => "KMS",
        "Amazon Route 53" => "Route 53",
        "AWS Certificate Manager" => "ACM",
        "Amazon Simple Notification Service" => "SNS",
        "Amazon Simple Queue Service" => "SQS",
        "AWS Systems Manager" => "Systems Manager",
        "Amazon API Gateway" => "API Gateway",
        other => other,
    }
}
