//! Reference status documents, one per dialect.
//!
//! All server fixtures describe the same two clients, `alice` and `bob`,
//! so their scans can be compared against each other.

use super::filesystem::MockFs;

/// `--status-version 2` server status.
pub const SERVER_V2_STATUS: &str = "\
TITLE,OpenVPN 2.5.9 x86_64-pc-linux-gnu [SSL (OpenSSL)] [LZO] [LZ4] [EPOLL] [MH/PKTINFO] [AEAD]
TIME,Sun Oct 20 09:23:08 2024,1729416188
HEADER,CLIENT_LIST,Common Name,Real Address,Virtual Address,Virtual IPv6 Address,Bytes Received,Bytes Sent,Connected Since,Connected Since (time_t),Username,Client ID,Peer ID,Data Channel Cipher
CLIENT_LIST,alice,198.51.100.7:51234,10.8.0.6,,1048576,2097152,Sun Oct 20 08:00:00 2024,1729411200,alice,0,0,AES-256-GCM
CLIENT_LIST,bob,203.0.113.9:40211,10.8.0.10,,4096,8192,Sun Oct 20 09:00:00 2024,1729414800,UNDEF,1,1,AES-256-GCM
HEADER,ROUTING_TABLE,Virtual Address,Common Name,Real Address,Last Ref,Last Ref (time_t)
ROUTING_TABLE,10.8.0.6,alice,198.51.100.7:51234,Sun Oct 20 09:23:01 2024,1729416181
ROUTING_TABLE,10.8.0.10,bob,203.0.113.9:40211,Sun Oct 20 09:22:45 2024,1729416165
GLOBAL_STATS,Max bcast/mcast queue length,0
END
";

/// `--status-version 3` server status: version 2 with tab separators.
pub const SERVER_V3_STATUS: &str = concat!(
    "TITLE\tOpenVPN 2.5.9 x86_64-pc-linux-gnu [SSL (OpenSSL)] [LZO] [LZ4] [EPOLL] [MH/PKTINFO] [AEAD]\n",
    "TIME\tSun Oct 20 09:23:08 2024\t1729416188\n",
    "HEADER\tCLIENT_LIST\tCommon Name\tReal Address\tVirtual Address\tVirtual IPv6 Address\tBytes Received\tBytes Sent\tConnected Since\tConnected Since (time_t)\tUsername\tClient ID\tPeer ID\tData Channel Cipher\n",
    "CLIENT_LIST\talice\t198.51.100.7:51234\t10.8.0.6\t\t1048576\t2097152\tSun Oct 20 08:00:00 2024\t1729411200\talice\t0\t0\tAES-256-GCM\n",
    "CLIENT_LIST\tbob\t203.0.113.9:40211\t10.8.0.10\t\t4096\t8192\tSun Oct 20 09:00:00 2024\t1729414800\tUNDEF\t1\t1\tAES-256-GCM\n",
    "HEADER\tROUTING_TABLE\tVirtual Address\tCommon Name\tReal Address\tLast Ref\tLast Ref (time_t)\n",
    "ROUTING_TABLE\t10.8.0.6\talice\t198.51.100.7:51234\tSun Oct 20 09:23:01 2024\t1729416181\n",
    "ROUTING_TABLE\t10.8.0.10\tbob\t203.0.113.9:40211\tSun Oct 20 09:22:45 2024\t1729416165\n",
    "GLOBAL_STATS\tMax bcast/mcast queue length\t0\n",
    "END\n",
);

/// `--status-version 1` server status with titled sections.
pub const SERVER_V4_STATUS: &str = "\
OpenVPN CLIENT LIST
Updated,2024-10-21 09:23:08
Common Name,Real Address,Bytes Received,Bytes Sent,Connected Since
alice,198.51.100.7:51234,1048576,2097152,2024-10-21 08:00:00
bob,203.0.113.9:40211,4096,8192,2024-10-21 09:00:00
ROUTING TABLE
Virtual Address,Common Name,Real Address,Last Ref
10.8.0.6,alice,198.51.100.7:51234,2024-10-21 09:23:01
10.8.0.10,bob,203.0.113.9:40211,2024-10-21 09:22:45
GLOBAL STATS
Max bcast/mcast queue length,0
END
";

/// Client statistics.
pub const CLIENT_STATUS: &str = "\
OpenVPN STATISTICS
Updated,Sun Oct 20 09:23:08 2024
TUN/TAP read bytes,153789941
TUN/TAP write bytes,308764078
TCP/UDP read bytes,292806201
TCP/UDP write bytes,197558969
Auth read bytes,308854782
pre-compress bytes,45388190
post-compress bytes,45446864
pre-decompress bytes,162596168
post-decompress bytes,216965355
END
";

impl MockFs {
    /// A host running one server of each status version and a client.
    ///
    /// Files live under `/run/openvpn/`: `server2.status`,
    /// `server3.status`, `server1.status` and `client.status`.
    pub fn openvpn_host() -> Self {
        let mut fs = Self::new();
        fs.add_file("/run/openvpn/server2.status", SERVER_V2_STATUS);
        fs.add_file("/run/openvpn/server3.status", SERVER_V3_STATUS);
        fs.add_file("/run/openvpn/server1.status", SERVER_V4_STATUS);
        fs.add_file("/run/openvpn/client.status", CLIENT_STATUS);
        fs
    }

    /// A server whose status file has a corrupt byte counter.
    pub fn corrupt_server() -> Self {
        let mut fs = Self::new();
        fs.add_file(
            "/run/openvpn/server2.status",
            SERVER_V2_STATUS.replace("1048576", "1048576k"),
        );
        fs
    }
}
